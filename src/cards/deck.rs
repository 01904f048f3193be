use super::card::Card;
use rand::seq::SliceRandom;
use rand::Rng;

/// the 52-card deck, shuffled once per hand and then drained by destructive
/// prefix-pop as chance transitions deal hole cards, flop, turn and river.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// a freshly shuffled deck, deterministic given `rng`.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut cards: Vec<Card> = (0..52u8).map(Card::from).collect();
        cards.shuffle(rng);
        Self { cards }
    }

    /// pop `n` cards off the top of the deck. panics if the deck is short --
    /// a 52-card deck dealing at most 2+2+3+1+1 = 9 cards per hand never is.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        assert!(self.cards.len() >= n, "deck exhausted: asked for {n} cards");
        self.cards.split_off(self.cards.len() - n)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// read the top `n` cards without dealing them. used by the offline
    /// combo sampler (spec §4.3), which only needs one fixed draw per
    /// shuffle and then discards the deck.
    pub fn peek(&self, n: usize) -> Vec<Card> {
        assert!(self.cards.len() >= n, "deck exhausted: asked for {n} cards");
        self.cards[self.cards.len() - n..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn deals_distinct_cards() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = Deck::shuffled(&mut rng);
        let mut seen = std::collections::HashSet::new();
        for n in [2, 2, 3, 1, 1] {
            for card in deck.deal(n) {
                assert!(seen.insert(card), "card dealt twice: {card}");
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn deterministic_given_seed() {
        let mut a = Deck::shuffled(&mut SmallRng::seed_from_u64(42));
        let mut b = Deck::shuffled(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a.deal(5), b.deal(5));
    }

    #[test]
    fn peek_does_not_consume() {
        let deck = Deck::shuffled(&mut SmallRng::seed_from_u64(3));
        let first = deck.peek(4);
        let second = deck.peek(4);
        assert_eq!(first, second);
        assert_eq!(deck.remaining(), 52);
    }
}
