use std::fmt::{Display, Formatter, Result};

/// one of the four suits, ordered to match the canonical string encoding
/// `s,h,d,c` used throughout persisted info-set keys and oracle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spade = 0,
    Heart = 1,
    Diamond = 2,
    Club = 3,
}

impl From<u8> for Suit {
    fn from(n: u8) -> Self {
        match n {
            0 => Suit::Spade,
            1 => Suit::Heart,
            2 => Suit::Diamond,
            3 => Suit::Club,
            _ => panic!("invalid suit index {n}"),
        }
    }
}

impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

impl TryFrom<char> for Suit {
    type Error = crate::error::SolverError;
    fn try_from(c: char) -> std::result::Result<Suit, crate::error::SolverError> {
        match c {
            's' => Ok(Suit::Spade),
            'h' => Ok(Suit::Heart),
            'd' => Ok(Suit::Diamond),
            'c' => Ok(Suit::Club),
            _ => Err(crate::error::SolverError::InvalidInput(format!(
                "unrecognized suit char '{c}'"
            ))),
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Spade => "s",
                Suit::Heart => "h",
                Suit::Diamond => "d",
                Suit::Club => "c",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_bijection() {
        for n in 0..4u8 {
            assert_eq!(u8::from(Suit::from(n)), n);
        }
    }

    #[test]
    fn char_round_trip() {
        for c in ['s', 'h', 'd', 'c'] {
            let suit = Suit::try_from(c).unwrap();
            assert_eq!(suit.to_string(), c.to_string());
        }
    }

    #[test]
    fn rejects_unknown_char() {
        assert!(Suit::try_from('x').is_err());
    }
}
