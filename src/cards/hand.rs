use super::card::Card;
use crate::Arbitrary;

/// exactly two hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand(Card, Card);

impl Hand {
    pub fn new(a: Card, b: Card) -> Self {
        assert_ne!(a, b, "a hand cannot contain the same card twice");
        Self(a, b)
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// cards sorted by rank descending, ties broken by suit -- the ordering
    /// the preflop and postflop abstractors both key off.
    pub fn sorted(&self) -> [Card; 2] {
        let mut cards = [self.0, self.1];
        cards.sort_by(|a, b| b.cmp(a));
        cards
    }
}

impl TryFrom<&[Card]> for Hand {
    type Error = crate::error::SolverError;
    fn try_from(cards: &[Card]) -> std::result::Result<Hand, crate::error::SolverError> {
        match cards {
            [a, b] => Ok(Hand::new(*a, *b)),
            _ => Err(crate::error::SolverError::InvalidInput(format!(
                "a hand must have exactly 2 cards, got {}",
                cards.len()
            ))),
        }
    }
}

impl Arbitrary for Hand {
    /// draws two distinct random cards by rejection sampling; collisions
    /// are rare enough (1/52) that a retry loop never noticeably spins.
    fn random(rng: &mut impl rand::Rng) -> Self {
        let a = Card::random(rng);
        let mut b = Card::random(rng);
        while b == a {
            b = Card::random(rng);
        }
        Self(a, b)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}
