use super::centroid::CentroidTable;
use super::ranges::range_spec_string;
use crate::cards::{Card, Hand};
use crate::equity::oracle::EquityOracle;
use crate::error::{Result, SolverError};

/// Monte-Carlo sample budget per range, per spec §4.2 step 1 -- the
/// reference default; callers thread the configured value through so it can
/// be lowered (e.g. in tests, or a faster-but-noisier training run) without
/// touching this module (spec §6.5 "equity Monte-Carlo iterations").
pub const EQUITY_ITERATIONS: u32 = 100_000;

/// board cards ordered by `(rank, suit)` ascending -- the ordering
/// `original_source/abstractions.py::abstract_hand_postflop` feeds to the
/// equity oracle. imperfect recall: only the unordered board matters, so
/// flop/turn/river share this one featurizer regardless of which street a
/// card arrived on.
fn board_string(board: &[Card]) -> String {
    let mut cards: Vec<Card> = board.to_vec();
    cards.sort_by(|a, b| (a.rank(), a.suit()).cmp(&(b.rank(), b.suit())));
    crate::cards::cards_to_string(&cards)
}

fn hand_string(hand: &Hand) -> String {
    crate::cards::cards_to_string(&hand.sorted())
}

/// the 8-D equity feature vector of a (hand, board) pair (spec §3): one
/// win-probability entry per opponent range tier, each an integer-valued
/// percentage in `[0, 100]`.
pub fn equity_vector(
    hand: &Hand,
    board: &[Card],
    oracle: &dyn EquityOracle,
    iterations: u32,
) -> Result<[f32; 8]> {
    assert_eq!(board.len().clamp(3, 5), board.len(), "board must be 3-5 cards");
    let hand_str = hand_string(hand);
    let board_str = board_string(board);
    let mut out = [0f32; 8];
    for (tier, slot) in out.iter_mut().enumerate() {
        let hand_spec = format!("{hand_str}:{}", range_spec_string(tier));
        let result = oracle.calc(&hand_spec, &board_str, "", iterations)?;
        let [win, lose] = result.ev;
        const TOLERANCE: f32 = 1e-3;
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&win)
            || !(-TOLERANCE..=1.0 + TOLERANCE).contains(&lose)
            || win + lose > 1.0 + TOLERANCE
        {
            return Err(SolverError::Oracle(vec![win, lose]));
        }
        *slot = (100.0 * win).round().clamp(0.0, 100.0);
    }
    Ok(out)
}

/// map a (hand, board) to a postflop cluster index in `[0, K)` (spec §4.2):
/// compute the 8-D equity vector, then return the nearest centroid, ties
/// broken by lowest index.
pub fn abstract_postflop(
    hand: &Hand,
    board: &[Card],
    centroids: &CentroidTable,
    oracle: &dyn EquityOracle,
    iterations: u32,
) -> Result<usize> {
    let vector = equity_vector(hand, board, oracle, iterations)?;
    Ok(centroids.nearest(&vector))
}
