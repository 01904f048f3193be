use super::evaluator::best_strength;
use super::oracle::{EquityOracle, EquityResult};
use crate::cards::{Card, Rank, Suit};
use crate::error::{Result, SolverError};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Mutex;

/// reference equity oracle satisfying spec §6.2's interface. enumerates the
/// concrete card combinations implied by a shorthand range, samples a
/// uniform opponent hand and a uniform river completion per trial, and
/// tallies win/tie/loss with the 7-card evaluator.
///
/// this exists so the rest of the system is runnable end-to-end; it is not
/// the production-grade equity engine the design treats as an external
/// black box (no isomorphism caching, no multithreading).
pub struct MonteCarloOracle {
    rng: Mutex<SmallRng>,
}

impl MonteCarloOracle {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

fn all_cards() -> Vec<Card> {
    (0..52u8).map(Card::from).collect()
}

/// expand one shorthand token ("AKs", "AKo", "77", or abbreviated "72") into
/// every concrete 2-card combination it denotes, excluding any card in
/// `dead`.
fn token_to_combos(token: &str, dead: &HashSet<Card>) -> Vec<(Card, Card)> {
    let chars: Vec<char> = token.chars().collect();
    let r1 = Rank::try_from(chars[0]).expect("valid rank char in range token");
    let r2 = Rank::try_from(chars[1]).expect("valid rank char in range token");
    let suffix = chars.get(2).copied();

    let want_suited = matches!(suffix, Some('s'));
    let want_offsuit = matches!(suffix, Some('o'));
    let is_pair = r1 == r2;
    let unsuffixed = suffix.is_none();

    let suits = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
    let mut combos = Vec::new();

    if is_pair {
        for i in 0..4 {
            for j in (i + 1)..4 {
                let a = Card::new(r1, suits[i]);
                let b = Card::new(r2, suits[j]);
                if !dead.contains(&a) && !dead.contains(&b) {
                    combos.push((a, b));
                }
            }
        }
        return combos;
    }

    for &sa in &suits {
        for &sb in &suits {
            let suited = sa == sb;
            if suited && !(want_suited || unsuffixed) {
                continue;
            }
            if !suited && !(want_offsuit || unsuffixed) {
                continue;
            }
            let a = Card::new(r1, sa);
            let b = Card::new(r2, sb);
            if a == b || dead.contains(&a) || dead.contains(&b) {
                continue;
            }
            combos.push((a, b));
        }
    }
    combos
}

/// expand a comma-joined range specifier (spec §6.2's "opponent" side of
/// `hand_spec`) into the deduplicated set of concrete opponent hands.
fn range_to_combos(range_spec: &str, dead: &HashSet<Card>) -> Vec<(Card, Card)> {
    let mut seen = HashSet::new();
    let mut combos = Vec::new();
    for token in range_spec.split(',') {
        for (a, b) in token_to_combos(token.trim(), dead) {
            let key = if u8::from(a) < u8::from(b) { (a, b) } else { (b, a) };
            if seen.insert(key) {
                combos.push(key);
            }
        }
    }
    combos
}

impl EquityOracle for MonteCarloOracle {
    fn calc(
        &self,
        hand_spec: &str,
        board_str: &str,
        dead_str: &str,
        iterations: u32,
    ) -> Result<EquityResult> {
        let (hand_part, range_part) = hand_spec.split_once(':').ok_or_else(|| {
            SolverError::InvalidInput(format!("hand_spec missing ':' separator: {hand_spec}"))
        })?;
        let hero = crate::cards::card::parse_cards(hand_part)?;
        if hero.len() != 2 {
            return Err(SolverError::InvalidInput(format!(
                "hero hand must be exactly 2 cards: {hand_part}"
            )));
        }
        let board = crate::cards::card::parse_cards(board_str)?;
        let dead_extra = crate::cards::card::parse_cards(dead_str)?;

        let mut dead: HashSet<Card> = HashSet::new();
        dead.extend(hero.iter().copied());
        dead.extend(board.iter().copied());
        dead.extend(dead_extra.iter().copied());

        let opponents = range_to_combos(range_part, &dead);
        if opponents.is_empty() {
            return Err(SolverError::InvalidInput(format!(
                "range '{range_part}' has no remaining combos given dead cards"
            )));
        }

        let mut rng = self.rng.lock().expect("oracle rng mutex poisoned");
        let mut wins = 0u32;
        let mut losses = 0u32;

        for _ in 0..iterations.max(1) {
            let (oa, ob) = *opponents.choose(&mut *rng).expect("nonempty opponents");
            let mut used = dead.clone();
            used.insert(oa);
            used.insert(ob);

            let mut runout = board.clone();
            let need = 5 - runout.len();
            let mut remaining: Vec<Card> = all_cards().into_iter().filter(|c| !used.contains(c)).collect();
            remaining.shuffle(&mut *rng);
            runout.extend(remaining.into_iter().take(need));

            let mut hero_seven = hero.clone();
            hero_seven.extend(runout.iter().copied());
            let mut opp_seven = vec![oa, ob];
            opp_seven.extend(runout.iter().copied());

            match best_strength(&hero_seven).cmp(&best_strength(&opp_seven)) {
                std::cmp::Ordering::Greater => wins += 1,
                std::cmp::Ordering::Less => losses += 1,
                std::cmp::Ordering::Equal => {}
            }
        }

        let total = iterations.max(1) as f32;
        Ok(EquityResult {
            ev: [wins as f32 / total, losses as f32 / total],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nut_hand_has_high_equity_on_complete_board() {
        let oracle = MonteCarloOracle::new(1);
        // hero holds the nut flush already on a 5-card board: equity must be 1
        let result = oracle
            .calc("AsKs:72o", "2s5s9sTc3d", "", 200)
            .expect("calc should succeed");
        assert!(result.ev[0] > 0.99, "expected near-certain win, got {:?}", result.ev);
    }

    #[test]
    fn probabilities_are_bounded() {
        let oracle = MonteCarloOracle::new(2);
        let result = oracle.calc("7h2c:AA", "", "", 300).unwrap();
        assert!(result.ev[0] >= 0.0 && result.ev[0] <= 1.0);
        assert!(result.ev[1] >= 0.0 && result.ev[1] <= 1.0);
        assert!(result.ev[0] + result.ev[1] <= 1.0001);
    }

    #[test]
    fn rejects_malformed_hand_spec() {
        let oracle = MonteCarloOracle::new(3);
        assert!(oracle.calc("AsKs", "", "", 10).is_err());
    }
}
