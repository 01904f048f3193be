use std::fmt::{Display, Formatter, Result};

/// the eight discretized actions of spec §4.5: check, fold, call, and three
/// bet/raise sizings (half-pot, pot, all-in). bets and raises collapse to
/// the same wire codes (`B:*`/`R:*`) but are distinguished by context --
/// whichever is legal at the node is the one meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Check,
    Fold,
    Call,
    BetHalf,
    BetPot,
    BetAll,
    RaisePot,
    RaiseAll,
}

impl Action {
    /// the fixed legality-ordering alphabet isn't meaningful; this just
    /// enumerates every wire code for parsing/display round-trips.
    pub const ALL: [Action; 8] = [
        Action::Check,
        Action::Fold,
        Action::Call,
        Action::BetHalf,
        Action::BetPot,
        Action::BetAll,
        Action::RaisePot,
        Action::RaiseAll,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Action::Check => "CK",
            Action::Fold => "F",
            Action::Call => "CL",
            Action::BetHalf => "B:H",
            Action::BetPot => "B:P",
            Action::BetAll => "B:A",
            Action::RaisePot => "R:P",
            Action::RaiseAll => "R:A",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.code())
    }
}

impl serde::Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Action, D::Error> {
        let s = String::deserialize(deserializer)?;
        Action::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<&str> for Action {
    type Error = crate::error::SolverError;
    fn try_from(s: &str) -> std::result::Result<Action, crate::error::SolverError> {
        Action::ALL
            .into_iter()
            .find(|a| a.code() == s)
            .ok_or_else(|| {
                crate::error::SolverError::InvalidInput(format!("unrecognized action code '{s}'"))
            })
    }
}
