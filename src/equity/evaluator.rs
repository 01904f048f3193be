use crate::cards::{Card, Rank};
use std::cmp::Ordering;

/// standard 5-card poker hand category, carrying enough rank information to
/// break ties by kicker. higher variants and higher embedded ranks both
/// compare greater; see `Ord` below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    HighCard([Rank; 5]),
    OnePair([Rank; 4]),
    TwoPair([Rank; 3]),
    ThreeOfAKind([Rank; 3]),
    Straight(Rank),
    Flush([Rank; 5]),
    FullHouse(Rank, Rank),
    FourOfAKind(Rank, Rank),
    StraightFlush(Rank),
}

impl Strength {
    fn category(&self) -> u8 {
        match self {
            Strength::HighCard(_) => 0,
            Strength::OnePair(_) => 1,
            Strength::TwoPair(_) => 2,
            Strength::ThreeOfAKind(_) => 3,
            Strength::Straight(_) => 4,
            Strength::Flush(_) => 5,
            Strength::FullHouse(..) => 6,
            Strength::FourOfAKind(..) => 7,
            Strength::StraightFlush(_) => 8,
        }
    }

    fn kickers(&self) -> Vec<Rank> {
        match self {
            Strength::HighCard(r) => r.to_vec(),
            Strength::OnePair(r) => r.to_vec(),
            Strength::TwoPair(r) => r.to_vec(),
            Strength::ThreeOfAKind(r) => r.to_vec(),
            Strength::Straight(r) => vec![*r],
            Strength::Flush(r) => r.to_vec(),
            Strength::FullHouse(a, b) => vec![*a, *b],
            Strength::FourOfAKind(a, b) => vec![*a, *b],
            Strength::StraightFlush(r) => vec![*r],
        }
    }
}

impl PartialOrd for Strength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Strength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category()
            .cmp(&other.category())
            .then_with(|| self.kickers().cmp(&other.kickers()))
    }
}

/// ranks a single 5-card hand. assumes `cards.len() == 5` and no duplicates.
fn rank_five(cards: &[Card]) -> Strength {
    let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
    ranks.sort_by(|a, b| b.cmp(a));

    let suited = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = straight_high_rank(&ranks);

    let mut counts: Vec<(Rank, usize)> = Vec::new();
    for r in &ranks {
        if let Some(entry) = counts.iter_mut().find(|(cr, _)| cr == r) {
            entry.1 += 1;
        } else {
            counts.push((*r, 1));
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    match (counts[0].1, counts.get(1).map(|c| c.1).unwrap_or(0)) {
        (4, _) => Strength::FourOfAKind(counts[0].0, counts[1].0),
        (3, 2) => Strength::FullHouse(counts[0].0, counts[1].0),
        (3, _) => {
            if let Some(high) = straight_high {
                if suited {
                    return Strength::StraightFlush(high);
                }
            }
            let kickers: Vec<Rank> = ranks.iter().filter(|r| **r != counts[0].0).cloned().collect();
            Strength::ThreeOfAKind([counts[0].0, kickers[0], kickers[1]])
        }
        (2, 2) => {
            let mut pairs = vec![counts[0].0, counts[1].0];
            pairs.sort_by(|a, b| b.cmp(a));
            let kicker = counts[2].0;
            Strength::TwoPair([pairs[0], pairs[1], kicker])
        }
        (2, _) => {
            let kickers: Vec<Rank> = ranks.iter().filter(|r| **r != counts[0].0).cloned().collect();
            Strength::OnePair([counts[0].0, kickers[0], kickers[1], kickers[2]])
        }
        _ => {
            if suited {
                if let Some(high) = straight_high {
                    return Strength::StraightFlush(high);
                }
                return Strength::Flush([ranks[0], ranks[1], ranks[2], ranks[3], ranks[4]]);
            }
            if let Some(high) = straight_high {
                return Strength::Straight(high);
            }
            Strength::HighCard([ranks[0], ranks[1], ranks[2], ranks[3], ranks[4]])
        }
    }
}

/// `ranks` must be sorted descending with no duplicates removed. returns the
/// high rank of a straight if the 5 ranks form one, treating ace-low
/// (A2345, "the wheel") as a straight to five.
fn straight_high_rank(ranks: &[Rank]) -> Option<Rank> {
    let mut values: Vec<u8> = ranks.iter().map(|r| u8::from(*r)).collect();
    values.dedup();
    if values.len() != 5 {
        return None;
    }
    if values[0] - values[4] == 4 {
        return Some(Rank::from(values[0]));
    }
    // ace-low: A,5,4,3,2 sorted descending is [12,3,2,1,0]
    if values == [12, 3, 2, 1, 0] {
        return Some(Rank::Five);
    }
    None
}

/// best 5-card `Strength` achievable from a 6-or-7-card pool (hole + board).
pub fn best_strength(cards: &[Card]) -> Strength {
    assert!(cards.len() >= 5, "need at least 5 cards to evaluate a hand");
    combinations(cards, 5)
        .into_iter()
        .map(|five| rank_five(&five))
        .max()
        .expect("at least one 5-card combination exists")
}

fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    if k == 0 {
        return vec![vec![]];
    }
    if cards.len() < k {
        return vec![];
    }
    let mut out = Vec::new();
    for i in 0..=(cards.len() - k) {
        let first = cards[i];
        for mut rest in combinations(&cards[i + 1..], k - 1) {
            rest.insert(0, first);
            out.push(rest);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn flush_beats_straight() {
        let flush = vec![
            card(Rank::Two, Suit::Spade),
            card(Rank::Five, Suit::Spade),
            card(Rank::Nine, Suit::Spade),
            card(Rank::Jack, Suit::Spade),
            card(Rank::King, Suit::Spade),
        ];
        let straight = vec![
            card(Rank::Four, Suit::Club),
            card(Rank::Five, Suit::Heart),
            card(Rank::Six, Suit::Diamond),
            card(Rank::Seven, Suit::Spade),
            card(Rank::Eight, Suit::Club),
        ];
        assert!(best_strength(&flush) > best_strength(&straight));
    }

    #[test]
    fn wheel_is_a_straight() {
        let wheel = vec![
            card(Rank::Ace, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Three, Suit::Diamond),
            card(Rank::Four, Suit::Spade),
            card(Rank::Five, Suit::Club),
        ];
        assert!(matches!(best_strength(&wheel), Strength::Straight(Rank::Five)));
    }

    #[test]
    fn picks_best_of_seven() {
        let seven = vec![
            card(Rank::Two, Suit::Club),
            card(Rank::Two, Suit::Heart),
            card(Rank::Two, Suit::Diamond),
            card(Rank::Two, Suit::Spade),
            card(Rank::Nine, Suit::Club),
            card(Rank::Four, Suit::Heart),
            card(Rank::Seven, Suit::Diamond),
        ];
        assert!(matches!(best_strength(&seven), Strength::FourOfAKind(Rank::Two, Rank::Nine)));
    }
}
