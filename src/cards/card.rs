use super::rank::Rank;
use super::suit::Suit;
use crate::Arbitrary;
use std::fmt::{Display, Formatter, Result};

/// a single playing card. canonical integer id is `(rank - 2) * 4 + (suit - 1)`
/// in the `0..52` range, matching the external card-string form `"AdKs"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.rank) * 4 + u8::from(c.suit)
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "card id out of range: {n}");
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = crate::error::SolverError;
    fn try_from(s: &str) -> std::result::Result<Card, crate::error::SolverError> {
        let mut chars = s.chars();
        let (rank_ch, suit_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => {
                return Err(crate::error::SolverError::InvalidInput(format!(
                    "card string must be exactly 2 characters, got '{s}'"
                )))
            }
        };
        Ok(Card {
            rank: Rank::try_from(rank_ch)?,
            suit: Suit::try_from(suit_ch)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl Arbitrary for Card {
    fn random(rng: &mut impl rand::Rng) -> Self {
        Card::from(rng.random_range(0..52u8))
    }
}

/// parse a concatenated multi-card string like `"TsJs4d"` with no separator.
pub fn parse_cards(s: &str) -> std::result::Result<Vec<Card>, crate::error::SolverError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(crate::error::SolverError::InvalidInput(format!(
            "card string has odd length: '{s}'"
        )));
    }
    chars
        .chunks(2)
        .map(|pair| {
            let pair: String = pair.iter().collect();
            Card::try_from(pair.as_str())
        })
        .collect()
}
