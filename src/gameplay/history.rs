use super::action::Action;
use crate::cards::{Card, Deck, Hand};
use crate::equity::evaluator::best_strength;
use rand::Rng;

/// chips behind the starting stack, fixed for every hand (spec §3).
pub const STARTING_STACK: i32 = 200;
pub const SB_AMT: i32 = 1;
pub const BB_AMT: i32 = 2;

/// the three-valued node tag driving the history state machine (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Chance,
    Action,
    Terminal,
}

/// one of the three bet/raise sizing codes an action resolves to (spec §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sizing {
    Half,
    Pot,
    All,
}

impl Action {
    fn sizing(&self) -> Option<Sizing> {
        match self {
            Action::BetHalf => Some(Sizing::Half),
            Action::BetPot | Action::RaisePot => Some(Sizing::Pot),
            Action::BetAll | Action::RaiseAll => Some(Sizing::All),
            _ => None,
        }
    }
}

/// a deterministic HUNL game history: public and private state, plus the
/// textual action log. the only hidden data is `hands[1 - p]` from player
/// `p`'s point of view -- the information-set encoder (§4.7) is what
/// enforces that hiding, not this struct.
#[derive(Debug, Clone)]
pub struct History {
    button: usize,
    active_player: usize,
    street: u8,
    node_type: NodeType,
    round: u8,
    board: Vec<Card>,
    hands: [Option<Hand>; 2],
    stacks: [i32; 2],
    contributions: [i32; 2],
    pot: i32,
    log: String,
    deck: Deck,
    last_actor: Option<usize>,
    last_action: Option<Action>,
    /// `2 * starting_stack` at this hand's root, for the chip-conservation
    /// invariant -- stored rather than read off the `STARTING_STACK`
    /// constant so a `Config`-supplied starting stack (spec §6.5) is
    /// honored without touching every call site.
    total_chips: i32,
    sb_amt: i32,
    bb_amt: i32,
}

impl History {
    /// a fresh hand at the reference stakes (`STARTING_STACK`/`SB_AMT`/
    /// `BB_AMT`): nothing dealt yet, waiting on the hole-card chance
    /// transition. `button` fixes which seat posts the small blind and acts
    /// first preflop for this hand.
    pub fn root(button: usize, rng: &mut impl Rng) -> Self {
        Self::root_with_stakes(button, STARTING_STACK, SB_AMT, BB_AMT, rng)
    }

    /// like `root`, but with a configurable starting stack and blinds (spec
    /// §6.5's `STARTING_STACK`/`SB`/`BB` knobs) -- what the trainer uses so
    /// a `Config` loaded from TOML actually takes effect.
    pub fn root_with_stakes(
        button: usize,
        starting_stack: i32,
        sb_amt: i32,
        bb_amt: i32,
        rng: &mut impl Rng,
    ) -> Self {
        assert!(button < 2, "button must be 0 or 1");
        Self {
            button,
            active_player: button,
            street: 0,
            node_type: NodeType::Chance,
            round: 0,
            board: Vec::new(),
            hands: [None, None],
            stacks: [starting_stack, starting_stack],
            contributions: [0, 0],
            pot: 0,
            log: String::new(),
            deck: Deck::shuffled(rng),
            last_actor: None,
            last_action: None,
            total_chips: 2 * starting_stack,
            sb_amt,
            bb_amt,
        }
    }

    pub fn button(&self) -> usize {
        self.button
    }
    pub fn active_player(&self) -> usize {
        self.active_player
    }
    pub fn street(&self) -> u8 {
        self.street
    }
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }
    pub fn round(&self) -> u8 {
        self.round
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn hand(&self, player: usize) -> Option<Hand> {
        self.hands[player]
    }
    pub fn stack(&self, player: usize) -> i32 {
        self.stacks[player]
    }
    pub fn contribution(&self, player: usize) -> i32 {
        self.contributions[player]
    }
    pub fn pot(&self) -> i32 {
        self.pot
    }
    pub fn log(&self) -> &str {
        &self.log
    }

    fn check_invariant(&self) {
        debug_assert_eq!(
            self.stacks[0] + self.stacks[1] + self.pot,
            self.total_chips,
            "chip conservation violated: {:?}",
            self
        );
    }

    /// deterministic chance transition: deal hole cards + post blinds
    /// (street 0), or the next board card(s) (streets 1-3). pure -- the
    /// underlying deck is already fixed at `root`, so no new randomness is
    /// consumed here.
    pub fn apply_chance(&self) -> Self {
        assert_eq!(self.node_type, NodeType::Chance, "not a chance node");
        let mut h = self.clone();
        match self.street {
            0 => {
                for p in 0..2 {
                    let cards = h.deck.deal(2);
                    h.hands[p] = Some(Hand::try_from(cards.as_slice()).expect("2 hole cards"));
                }
                let bb = 1 - h.button;
                h.stacks[h.button] -= h.sb_amt;
                h.contributions[h.button] += h.sb_amt;
                h.stacks[bb] -= h.bb_amt;
                h.contributions[bb] += h.bb_amt;
                h.pot = h.sb_amt + h.bb_amt;
                h.street = 1;
                h.node_type = NodeType::Action;
            }
            1 => {
                h.board.extend(h.deck.deal(3));
                h.street = 2;
                h.node_type = NodeType::Action;
            }
            2 => {
                h.board.extend(h.deck.deal(1));
                h.street = 3;
                h.node_type = NodeType::Action;
            }
            3 => {
                h.board.extend(h.deck.deal(1));
                h.street = 4;
                h.node_type = NodeType::Action;
            }
            s => panic!("chance transition from unreachable street {s}"),
        }
        h.check_invariant();
        h
    }

    fn prev_bet(&self) -> i32 {
        (self.contributions[0] - self.contributions[1]).abs()
    }

    /// legal actions at this node, per spec §4.5's legality table.
    pub fn legal_actions(&self) -> Vec<Action> {
        assert_eq!(self.node_type, NodeType::Action, "not an action node");
        let p = self.active_player;
        let prev_bet = self.prev_bet();

        if self.stacks[0] == 0 || self.stacks[1] == 0 {
            return if self.stacks[p] == 0 {
                vec![Action::Check]
            } else if prev_bet > 0 {
                vec![Action::Fold, Action::Call]
            } else {
                vec![Action::Check]
            };
        }
        if self.round == 2 {
            assert!(prev_bet > 0, "round 2 implies a standing bet");
            return vec![Action::Fold, Action::Call];
        }
        if prev_bet > 0 {
            vec![Action::Fold, Action::Call, Action::RaisePot, Action::RaiseAll]
        } else {
            vec![Action::Check, Action::BetHalf, Action::BetPot, Action::BetAll]
        }
    }

    /// resolve a bet/raise sizing code to a concrete chip amount (spec §4.5).
    pub fn bet_amount(&self, action: Action) -> i32 {
        let sizing = action.sizing().expect("bet_amount called on non-bet action");
        let p = self.active_player;
        let o = 1 - p;
        let prev_bet = self.prev_bet();
        let min_bet = self.bb_amt.max(prev_bet);
        let max_bet = self.stacks[p].min(self.stacks[o] + prev_bet);
        assert!(max_bet >= min_bet, "max_bet below min_bet");
        let raw = match sizing {
            Sizing::Half => self.pot / 2,
            Sizing::Pot => self.pot + 2 * prev_bet,
            Sizing::All => max_bet,
        };
        raw.clamp(min_bet, max_bet)
    }

    /// apply a legal action, returning a new history. pure w.r.t. `self`.
    pub fn apply_action(&self, action: Action) -> Self {
        assert_eq!(self.node_type, NodeType::Action, "not an action node");
        assert!(
            self.legal_actions().contains(&action),
            "illegal action {action} at this node"
        );
        let mut h = self.clone();
        let p = self.active_player;
        let old_street = self.street;

        match action {
            Action::Fold => {
                h.node_type = NodeType::Terminal;
            }
            Action::Check => {
                if self.street == 1 {
                    assert_ne!(p, self.button, "small blind can never check preflop");
                    h.street = 2;
                    h.node_type = NodeType::Chance;
                } else if p == self.button {
                    if self.street == 4 {
                        h.node_type = NodeType::Terminal;
                    } else {
                        h.street += 1;
                        h.node_type = NodeType::Chance;
                    }
                }
                // OOP postflop check: stay on this action node, turn passes below.
            }
            Action::Call => {
                let o = 1 - p;
                let prev_bet = self.prev_bet();
                assert!(
                    self.contributions[p] < self.contributions[o],
                    "call requires trailing in contributions"
                );
                h.stacks[p] -= prev_bet;
                h.contributions[p] += prev_bet;
                h.pot += prev_bet;
                assert_eq!(h.contributions[0], h.contributions[1]);

                if self.street == 1 {
                    if p == self.button {
                        if self.round > 0 {
                            h.street = 2;
                            h.node_type = NodeType::Chance;
                        }
                        // else: a limp: BB still has to act, stay on this node.
                    } else {
                        h.street = 2;
                        h.node_type = NodeType::Chance;
                    }
                } else if self.street == 4 {
                    h.node_type = NodeType::Terminal;
                } else {
                    h.street += 1;
                    h.node_type = NodeType::Chance;
                }
            }
            Action::BetHalf | Action::BetPot | Action::BetAll => {
                assert_eq!(
                    self.contributions[0], self.contributions[1],
                    "betting requires equal contributions"
                );
                let amount = self.bet_amount(action);
                h.stacks[p] -= amount;
                h.contributions[p] += amount;
                h.pot += amount;
                h.round += 1;
                assert!(h.round <= 2);
            }
            Action::RaisePot | Action::RaiseAll => {
                let amount = self.bet_amount(action);
                h.stacks[p] -= amount;
                h.contributions[p] += amount;
                h.pot += amount;
                h.round += 1;
                assert!(h.round <= 2);
            }
        }

        if h.street > old_street {
            h.contributions = [0, 0];
            h.round = 0;
            h.active_player = 1 - self.button;
        } else if h.node_type != NodeType::Terminal {
            h.active_player = 1 - p;
        }

        h.log.push_str(&format!("{}~{},", p, action.code()));
        h.last_actor = Some(p);
        h.last_action = Some(action);
        h.check_invariant();
        h
    }

    /// terminal payoffs (p0, p1); zero-sum (spec §4.6.1). preserves the
    /// fold-payout formula exactly as specified -- see DESIGN.md Decision 1.
    pub fn terminal_utility(&self) -> (f32, f32) {
        assert_eq!(self.node_type, NodeType::Terminal, "not a terminal node");
        match self.last_action {
            Some(Action::Fold) => {
                let folder = self.last_actor.expect("fold must have an actor");
                let winner = 1 - folder;
                let win = (self.pot - self.contributions[winner]) as f32 / 2.0;
                if winner == 0 {
                    (win, -win)
                } else {
                    (-win, win)
                }
            }
            Some(Action::Check) | Some(Action::Call) => {
                assert_eq!(self.street, 4, "showdown requires a complete river");
                assert_eq!(self.board.len(), 5, "showdown requires a 5-card board");
                let hero0 = self.hands[0].expect("hand dealt");
                let hero1 = self.hands[1].expect("hand dealt");
                let mut seven0 = hero0.cards().to_vec();
                seven0.extend(self.board.iter().copied());
                let mut seven1 = hero1.cards().to_vec();
                seven1.extend(self.board.iter().copied());
                let win = self.pot as f32 / 2.0;
                match best_strength(&seven0).cmp(&best_strength(&seven1)) {
                    std::cmp::Ordering::Greater => (win, -win),
                    std::cmp::Ordering::Less => (-win, win),
                    std::cmp::Ordering::Equal => (0.0, 0.0),
                }
            }
            _ => panic!("reached terminal node by an unexpected path"),
        }
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "pot={} street={} round={} stacks={:?} contrib={:?} log=\"{}\"",
            self.pot, self.street, self.round, self.stacks, self.contributions, self.log
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn root_is_chance_and_invariant_holds() {
        let h = History::root(0, &mut rng(1));
        assert_eq!(h.node_type(), NodeType::Chance);
        assert_eq!(h.stack(0) + h.stack(1) + h.pot(), 2 * STARTING_STACK);
    }

    #[test]
    fn deal_posts_blinds_and_sets_pot() {
        let h = History::root(0, &mut rng(1)).apply_chance();
        assert_eq!(h.node_type(), NodeType::Action);
        assert_eq!(h.street(), 1);
        assert_eq!(h.pot(), SB_AMT + BB_AMT);
        assert_eq!(h.contribution(0), SB_AMT);
        assert_eq!(h.contribution(1), BB_AMT);
        assert_eq!(h.active_player(), 0); // button (SB) acts first preflop
        assert_eq!(h.stack(0) + h.stack(1) + h.pot(), 2 * STARTING_STACK);
    }

    /// a `Config`-supplied starting stack/blinds (spec §6.5) must actually
    /// take effect, not just the reference `STARTING_STACK`/`SB_AMT`/`BB_AMT`.
    #[test]
    fn root_with_stakes_honors_configured_values() {
        let h = History::root_with_stakes(0, 100, 2, 4, &mut rng(1)).apply_chance();
        assert_eq!(h.pot(), 6);
        assert_eq!(h.contribution(0), 2);
        assert_eq!(h.contribution(1), 4);
        assert_eq!(h.stack(0) + h.stack(1) + h.pot(), 200);
        let min_bet_legal = h.bet_amount(Action::RaisePot);
        assert!(min_bet_legal >= 4, "min_bet must track the configured big blind");
    }

    /// S1 -- preflop fold-through: a zero-sum payout from a button fold.
    #[test]
    fn s1_preflop_fold_through() {
        let h = History::root(0, &mut rng(7)).apply_chance();
        let h = h.apply_action(Action::Fold);
        assert_eq!(h.node_type(), NodeType::Terminal);
        let (u0, u1) = h.terminal_utility();
        assert_eq!(u0 + u1, 0.0);
        assert!(u0 < 0.0, "button folded, button loses");
    }

    /// S2 -- limped flop check-through: contributions reset at every street.
    #[test]
    fn s2_limped_checked_through_to_showdown() {
        let mut h = History::root(0, &mut rng(11)).apply_chance();
        assert_eq!(h.pot(), 3);
        h = h.apply_action(Action::Call); // SB limps
        assert_eq!(h.node_type(), NodeType::Action);
        h = h.apply_action(Action::Check); // BB checks back
        assert_eq!(h.node_type(), NodeType::Chance);
        h = h.apply_chance(); // flop
        assert_eq!(h.street(), 2);
        assert_eq!(h.contribution(0), 0);
        assert_eq!(h.contribution(1), 0);
        assert_eq!(h.pot(), 4);
        assert_eq!(h.stack(0), 198);
        assert_eq!(h.stack(1), 198);

        for _ in 0..2 {
            h = h.apply_action(Action::Check);
        }
        assert_eq!(h.node_type(), NodeType::Chance);
        h = h.apply_chance(); // turn
        assert_eq!(h.contribution(0), 0);
        assert_eq!(h.contribution(1), 0);

        for _ in 0..2 {
            h = h.apply_action(Action::Check);
        }
        h = h.apply_chance(); // river
        assert_eq!(h.street(), 4);
        assert_eq!(h.contribution(0), 0);
        assert_eq!(h.contribution(1), 0);

        h = h.apply_action(Action::Check);
        h = h.apply_action(Action::Check);
        assert_eq!(h.node_type(), NodeType::Terminal);
        let (u0, u1) = h.terminal_utility();
        assert_eq!(u0 + u1, 0.0);
    }

    /// S3 -- preflop 3-bet call: round reaches 2, next legal set is {F, CL}.
    #[test]
    fn s3_preflop_three_bet_reaches_round_two() {
        let h = History::root(0, &mut rng(3)).apply_chance();
        let h = h.apply_action(Action::RaisePot);
        assert_eq!(h.round(), 1);
        let legal = h.legal_actions();
        assert!(legal.contains(&Action::RaisePot));
        let h = h.apply_action(Action::RaisePot);
        assert_eq!(h.round(), 2);
        let legal = h.legal_actions();
        assert_eq!(legal, vec![Action::Fold, Action::Call]);
        let h = h.apply_action(Action::Call);
        assert_eq!(h.node_type(), NodeType::Chance);
    }

    /// S4 -- all-in clamp: bet sizing codes clamp into [min_bet, max_bet].
    #[test]
    fn s4_all_in_clamp() {
        let mut h = History::root(0, &mut rng(5)).apply_chance();
        // force a short stack scenario directly for the clamp arithmetic
        h = h.apply_action(Action::RaisePot); // round 1, pot grows
        let pot = h.pot();
        let prev_bet = (h.contribution(0) - h.contribution(1)).abs();
        let min_bet = BB_AMT.max(prev_bet);
        let max_bet = h.stack(h.active_player()).min(h.stack(1 - h.active_player()) + prev_bet);
        let pot_amt = h.bet_amount(Action::RaisePot);
        assert!(pot_amt >= min_bet && pot_amt <= max_bet);
        let all_amt = h.bet_amount(Action::RaiseAll);
        assert_eq!(all_amt, max_bet);
        let _ = pot;
    }

    #[test]
    fn purity_clone_not_mutated() {
        let h = History::root(0, &mut rng(1)).apply_chance();
        let before = h.pot();
        let _ = h.apply_action(Action::Call);
        assert_eq!(h.pot(), before);
    }

    /// S6 -- a random agent at every action node still nets exactly zero
    /// at every one of 1000 rollouts, not merely on average: the payout
    /// formula in `terminal_utility` is symmetric by construction.
    #[test]
    fn s6_zero_sum_over_1000_random_rollouts() {
        use rand::seq::SliceRandom;
        let mut driver = rng(99);
        for hand in 0..1000 {
            let mut h = History::root((hand % 2) as usize, &mut driver);
            loop {
                h = match h.node_type() {
                    NodeType::Chance => h.apply_chance(),
                    NodeType::Action => {
                        let legal = h.legal_actions();
                        let action = *legal.choose(&mut driver).expect("nonempty legal set");
                        h.apply_action(action)
                    }
                    NodeType::Terminal => break,
                };
            }
            let (u0, u1) = h.terminal_utility();
            assert_eq!(u0 + u1, 0.0, "hand {hand} was not zero-sum: {h}");
        }
    }
}
