//! Event session catalog.
//!
//! # Responsibility
//! - Enumerate the sessions attendees can register for.
//! - Convert between sessions and their persisted/wire labels.
//!
//! # Invariants
//! - `label()` and `FromStr` are exact inverses; `FromStr` also accepts the
//!   short `code()` for operator input.
//! - Serialized form is the label, so stored rows and credentials stay
//!   readable by the surrounding web layer.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One scheduled session (event day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "Friday, January 24th, 2025")]
    Friday,
    #[serde(rename = "Saturday, January 25th, 2025")]
    Saturday,
    #[serde(rename = "Sunday, January 26th, 2025")]
    Sunday,
}

impl Session {
    /// All sessions in calendar order.
    pub const ALL: [Session; 3] = [Session::Friday, Session::Saturday, Session::Sunday];

    /// Human-readable label used in storage and credential payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::Friday => "Friday, January 24th, 2025",
            Self::Saturday => "Saturday, January 25th, 2025",
            Self::Sunday => "Sunday, January 26th, 2025",
        }
    }

    /// Three-letter day code used in log lines and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Self::Friday => "fri",
            Self::Saturday => "sat",
            Self::Sunday => "sun",
        }
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Label did not name any known session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSessionError(pub String);

impl Display for UnknownSessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown session `{}`", self.0)
    }
}

impl Error for UnknownSessionError {}

impl FromStr for Session {
    type Err = UnknownSessionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|session| {
                session.label() == trimmed || session.code().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| UnknownSessionError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Session;

    #[test]
    fn labels_parse_back_to_same_session() {
        for session in Session::ALL {
            assert_eq!(session.label().parse::<Session>().unwrap(), session);
        }
    }

    #[test]
    fn parse_trims_but_is_otherwise_exact() {
        assert_eq!(
            "  Sunday, January 26th, 2025 ".parse::<Session>().unwrap(),
            Session::Sunday
        );
        let err = "sunday, january 26th, 2025".parse::<Session>().unwrap_err();
        assert!(err.to_string().contains("unknown session"));
    }

    #[test]
    fn short_codes_are_accepted_case_insensitively() {
        assert_eq!("FRI".parse::<Session>().unwrap(), Session::Friday);
        assert_eq!("sat".parse::<Session>().unwrap(), Session::Saturday);
    }

    #[test]
    fn serde_rejects_short_codes() {
        assert!(serde_json::from_str::<Session>("\"fri\"").is_err());
    }

    #[test]
    fn serde_uses_label() {
        let json = serde_json::to_string(&Session::Saturday).unwrap();
        assert_eq!(json, "\"Saturday, January 25th, 2025\"");
    }
}
