use crate::gameplay::Action;
use std::collections::HashMap;

/// regret matching (spec §4.9): positive regret proportional strategy, or
/// uniform over `actions` if no action carries positive regret.
pub fn regret_matched_strategy(
    regrets: &HashMap<Action, f32>,
    actions: &[Action],
) -> HashMap<Action, f32> {
    assert!(!actions.is_empty(), "regret matching needs at least one legal action");
    let positive: HashMap<Action, f32> = actions
        .iter()
        .map(|&a| (a, regrets.get(&a).copied().unwrap_or(0.0).max(0.0)))
        .collect();
    let total: f32 = positive.values().sum();
    if total > 0.0 {
        positive.into_iter().map(|(a, r)| (a, r / total)).collect()
    } else {
        let uniform = 1.0 / actions.len() as f32;
        actions.iter().map(|&a| (a, uniform)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Action;

    #[test]
    fn uniform_when_all_regrets_nonpositive() {
        let mut regrets = HashMap::new();
        regrets.insert(Action::Check, -5.0);
        regrets.insert(Action::Fold, 0.0);
        let actions = vec![Action::Check, Action::Fold];
        let strategy = regret_matched_strategy(&regrets, &actions);
        assert_eq!(strategy[&Action::Check], 0.5);
        assert_eq!(strategy[&Action::Fold], 0.5);
    }

    #[test]
    fn proportional_to_positive_regret() {
        let mut regrets = HashMap::new();
        regrets.insert(Action::Check, 3.0);
        regrets.insert(Action::Fold, 1.0);
        let actions = vec![Action::Check, Action::Fold];
        let strategy = regret_matched_strategy(&regrets, &actions);
        assert!((strategy[&Action::Check] - 0.75).abs() < 1e-6);
        assert!((strategy[&Action::Fold] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn missing_entries_default_to_zero_regret() {
        let regrets = HashMap::new();
        let actions = vec![Action::Check, Action::Fold, Action::BetPot];
        let strategy = regret_matched_strategy(&regrets, &actions);
        for a in &actions {
            assert!((strategy[a] - 1.0 / 3.0).abs() < 1e-6);
        }
    }
}
