//! Domain error taxonomy returned by every ledger operation.
//!
//! # Invariants
//! - Conflict and precondition errors are returned only when nothing was
//!   written.
//! - Callers branch on `GateError::kind()`, never on message text.

use crate::codec::MalformedCredential;
use crate::model::attendee::{AttendeeId, AttendeeValidationError};
use crate::model::session::{Session, UnknownSessionError};
use crate::repo::attendee_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GateResult<T> = Result<T, GateError>;

/// Coarse error class used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input could not be parsed or failed profile checks.
    Validation,
    /// Write would duplicate an existing record.
    Conflict,
    /// Required prior state is missing.
    Precondition,
    /// Credential was scanned at a gate for another session.
    SessionMismatch,
    /// Store unreachable or returned an unexpected failure.
    Storage,
}

impl ErrorKind {
    /// Stable snake_case tag for logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Precondition => "precondition",
            Self::SessionMismatch => "session_mismatch",
            Self::Storage => "storage",
        }
    }
}

#[derive(Debug)]
pub enum GateError {
    MalformedCredential(MalformedCredential),
    InvalidProfile(AttendeeValidationError),
    UnknownSession(UnknownSessionError),
    AlreadyRegisteredForSession {
        attendee_id: AttendeeId,
        session: Session,
    },
    AlreadyCheckedIn {
        attendee_id: AttendeeId,
        session: Session,
    },
    NotEnrolled {
        attendee_id: AttendeeId,
        session: Session,
    },
    NotCheckedIn {
        attendee_id: AttendeeId,
        session: Session,
    },
    AttendeeNotFound,
    WrongSession {
        gate: Session,
        scanned: Session,
    },
    Storage(RepoError),
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedCredential(_) | Self::InvalidProfile(_) | Self::UnknownSession(_) => {
                ErrorKind::Validation
            }
            Self::AlreadyRegisteredForSession { .. } | Self::AlreadyCheckedIn { .. } => {
                ErrorKind::Conflict
            }
            Self::NotEnrolled { .. } | Self::NotCheckedIn { .. } | Self::AttendeeNotFound => {
                ErrorKind::Precondition
            }
            Self::WrongSession { .. } => ErrorKind::SessionMismatch,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl Display for GateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedCredential(err) => write!(f, "{err}"),
            Self::InvalidProfile(err) => write!(f, "invalid registration: {err}"),
            Self::UnknownSession(err) => write!(f, "{err}"),
            Self::AlreadyRegisteredForSession { session, .. } => {
                write!(f, "already registered for session `{session}`")
            }
            Self::AlreadyCheckedIn { session, .. } => {
                write!(f, "already checked in to session `{session}`")
            }
            Self::NotEnrolled {
                attendee_id,
                session,
            } => write!(
                f,
                "attendee {attendee_id} is not registered for session `{session}`"
            ),
            Self::NotCheckedIn {
                attendee_id,
                session,
            } => write!(
                f,
                "attendee {attendee_id} is not checked in to session `{session}`"
            ),
            Self::AttendeeNotFound => write!(f, "attendee is not registered"),
            Self::WrongSession { gate, scanned } => write!(
                f,
                "credential is for session `{scanned}` but this gate admits `{gate}`"
            ),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for GateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedCredential(err) => Some(err),
            Self::InvalidProfile(err) => Some(err),
            Self::UnknownSession(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GateError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<MalformedCredential> for GateError {
    fn from(value: MalformedCredential) -> Self {
        Self::MalformedCredential(value)
    }
}

impl From<AttendeeValidationError> for GateError {
    fn from(value: AttendeeValidationError) -> Self {
        Self::InvalidProfile(value)
    }
}

impl From<UnknownSessionError> for GateError {
    fn from(value: UnknownSessionError) -> Self {
        Self::UnknownSession(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, GateError};
    use crate::model::session::Session;
    use crate::repo::attendee_repo::RepoError;
    use uuid::Uuid;

    #[test]
    fn kinds_follow_taxonomy() {
        let id = Uuid::new_v4();
        let session = Session::Friday;
        let cases = [
            (
                GateError::AlreadyRegisteredForSession {
                    attendee_id: id,
                    session,
                },
                ErrorKind::Conflict,
            ),
            (
                GateError::AlreadyCheckedIn {
                    attendee_id: id,
                    session,
                },
                ErrorKind::Conflict,
            ),
            (
                GateError::NotEnrolled {
                    attendee_id: id,
                    session,
                },
                ErrorKind::Precondition,
            ),
            (
                GateError::NotCheckedIn {
                    attendee_id: id,
                    session,
                },
                ErrorKind::Precondition,
            ),
            (GateError::AttendeeNotFound, ErrorKind::Precondition),
            (
                GateError::WrongSession {
                    gate: Session::Saturday,
                    scanned: session,
                },
                ErrorKind::SessionMismatch,
            ),
            (
                GateError::Storage(RepoError::InvalidData("x".to_string())),
                ErrorKind::Storage,
            ),
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{error}");
        }
    }

    #[test]
    fn wrong_session_message_names_both_sessions() {
        let message = GateError::WrongSession {
            gate: Session::Saturday,
            scanned: Session::Friday,
        }
        .to_string();
        assert!(message.contains("Friday, January 24th, 2025"));
        assert!(message.contains("Saturday, January 25th, 2025"));
    }
}
