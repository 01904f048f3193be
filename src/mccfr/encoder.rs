use crate::abstraction::{abstract_postflop, abstract_preflop, CentroidTable};
use crate::equity::oracle::EquityOracle;
use crate::error::Result;
use crate::gameplay::History;

/// the information set a history collapses to from `p`'s vantage (spec
/// §4.7): the exact string form is reproduced byte-for-byte from
/// `original_source/cfr_helpers.py::convert_to_information_set`. Hides
/// `1 - p`'s hole cards; exposes everything else, including the full action
/// log -- two histories sharing a key are the same decision point to `p`.
pub fn information_set(
    h: &History,
    p: usize,
    centroids: &CentroidTable,
    oracle: &dyn EquityOracle,
    equity_iterations: u32,
) -> Result<String> {
    let hand = h.hand(p).expect("viewpoint player's hand must be dealt by this point");
    let hand_board = if h.board().is_empty() {
        abstract_preflop(&hand)
    } else {
        abstract_postflop(&hand, h.board(), centroids, oracle, equity_iterations)?.to_string()
    };
    let o = 1 - p;
    Ok(format!(
        "H:{hand_board},S:{street},D:{d}, INFO:{pot},{stack_p},{stack_o},{contrib_p},{contrib_o},{log}",
        street = h.street(),
        d = if h.button() == p { 1 } else { 0 },
        pot = h.pot(),
        stack_p = h.stack(p),
        stack_o = h.stack(o),
        contrib_p = h.contribution(p),
        contrib_o = h.contribution(o),
        log = h.log(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equity::montecarlo::MonteCarloOracle;
    use crate::gameplay::Action;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn preflop_key_hides_opponent_cards() {
        let h = History::root(0, &mut SmallRng::seed_from_u64(4)).apply_chance();
        let centroids = CentroidTable::from_vecs(vec![[0.0; 8]]);
        let oracle = MonteCarloOracle::new(1);
        let key0 = information_set(&h, 0, &centroids, &oracle, 200).unwrap();
        let key1 = information_set(&h, 1, &centroids, &oracle, 200).unwrap();
        assert!(key0.starts_with("H:"));
        assert_ne!(key0, key1, "distinct viewpoints must not collide in general");
        assert!(!key0.contains(&h.hand(1).unwrap().to_string()));
    }

    #[test]
    fn two_histories_with_same_public_state_share_a_key() {
        let h1 = History::root(0, &mut SmallRng::seed_from_u64(4)).apply_chance();
        let h2 = History::root(0, &mut SmallRng::seed_from_u64(4)).apply_chance();
        let centroids = CentroidTable::from_vecs(vec![[0.0; 8]]);
        let oracle = MonteCarloOracle::new(1);
        let key1 = information_set(&h1, 0, &centroids, &oracle, 200).unwrap();
        let key2 = information_set(&h2, 0, &centroids, &oracle, 200).unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn key_changes_after_an_action_is_logged() {
        let h0 = History::root(0, &mut SmallRng::seed_from_u64(9)).apply_chance();
        let h1 = h0.apply_action(Action::Call);
        let centroids = CentroidTable::from_vecs(vec![[0.0; 8]]);
        let oracle = MonteCarloOracle::new(1);
        let key0 = information_set(&h0, 1, &centroids, &oracle, 200).unwrap();
        let key1 = information_set(&h1, 1, &centroids, &oracle, 200).unwrap();
        assert_ne!(key0, key1);
    }
}
