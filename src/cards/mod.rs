pub mod card;
pub mod deck;
pub mod hand;
pub mod rank;
pub mod suit;

pub use card::Card;
pub use deck::Deck;
pub use hand::Hand;
pub use rank::Rank;
pub use suit::Suit;

/// render a list of cards as the concatenated external string form, e.g.
/// `"TsJs4d"` -- no separators.
pub fn cards_to_string(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect()
}
