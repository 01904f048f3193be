use crate::error::Result;

/// win probabilities returned by an equity calculation: `ev[0]`/`ev[1]` are
/// hero/opponent win probabilities in `[0, 1]` summing to at most 1 (the
/// remainder is tie probability), per spec §6.2.
#[derive(Debug, Clone, Copy)]
pub struct EquityResult {
    pub ev: [f32; 2],
}

/// the equity oracle is an external collaborator (spec §1): given a hand
/// (or range) against an opponent range on a partial board, estimate win
/// probabilities. implementations may enumerate exactly or sample via
/// Monte Carlo; the trainer and abstractor only depend on this interface.
/// `Sync` so a `&dyn EquityOracle` can be shared across the `parallel`
/// feature's concurrent traversals (spec §5).
pub trait EquityOracle: Sync {
    /// `hand_spec` is `"hand:opponent"`, e.g. `"AhKh:QQ+,AKs"`; either side
    /// may be a 169-shorthand range specifier. `board_str` is 0-5
    /// concatenated board cards. `dead_str` lists cards removed from
    /// consideration (may be empty). `iterations` bounds the Monte Carlo
    /// sample budget; exact enumeration is permitted to ignore it.
    fn calc(
        &self,
        hand_spec: &str,
        board_str: &str,
        dead_str: &str,
        iterations: u32,
    ) -> Result<EquityResult>;
}
