//! Session guard for entry gates bound to one session.

use crate::error::{GateError, GateResult};
use crate::model::session::Session;
use log::warn;

/// Stateless check that a scanned credential belongs to this gate's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateValidator {
    session: Session,
}

impl GateValidator {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> Session {
        self.session
    }

    /// Fails with `WrongSession` unless `scanned` is this gate's session.
    pub fn match_session(&self, scanned: Session) -> GateResult<()> {
        if scanned == self.session {
            return Ok(());
        }
        warn!(
            "event=gate_match module=gate status=rejected error_code=wrong_session gate={} scanned={}",
            self.session.code(),
            scanned.code()
        );
        Err(GateError::WrongSession {
            gate: self.session,
            scanned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::GateValidator;
    use crate::error::GateError;
    use crate::model::session::Session;

    #[test]
    fn matching_session_passes() {
        GateValidator::new(Session::Friday)
            .match_session(Session::Friday)
            .unwrap();
    }

    #[test]
    fn other_session_is_rejected() {
        let err = GateValidator::new(Session::Saturday)
            .match_session(Session::Friday)
            .unwrap_err();
        assert!(matches!(
            err,
            GateError::WrongSession {
                gate: Session::Saturday,
                scanned: Session::Friday
            }
        ));
    }
}
