//! Enrollment ledger: which sessions an attendee registered for.

use crate::error::{GateError, GateResult};
use crate::model::attendee::AttendeeId;
use crate::model::session::Session;
use crate::repo::attendee_repo::RepoError;
use crate::repo::enrollment_repo::EnrollmentRepository;
use log::{info, warn};

pub struct EnrollmentLedger<R: EnrollmentRepository> {
    repo: R,
}

impl<R: EnrollmentRepository> EnrollmentLedger<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records that `attendee_id` registered for `session`.
    ///
    /// # Errors
    /// - `AlreadyRegisteredForSession` when the pair exists; nothing is written.
    /// - `AttendeeNotFound` when the attendee id is unknown.
    pub fn enroll(&self, attendee_id: AttendeeId, session: Session) -> GateResult<()> {
        match self.repo.insert_enrollment(attendee_id, session) {
            Ok(()) => {
                info!(
                    "event=enroll module=enrollment status=ok attendee_id={attendee_id} session={}",
                    session.code()
                );
                Ok(())
            }
            Err(RepoError::Conflict(_)) => {
                warn!(
                    "event=enroll module=enrollment status=rejected error_code=already_registered attendee_id={attendee_id} session={}",
                    session.code()
                );
                Err(GateError::AlreadyRegisteredForSession {
                    attendee_id,
                    session,
                })
            }
            Err(RepoError::MissingParent(_)) => Err(GateError::AttendeeNotFound),
            Err(err) => Err(err.into()),
        }
    }

    pub fn is_enrolled(&self, attendee_id: AttendeeId, session: Session) -> GateResult<bool> {
        Ok(self.repo.enrollment_exists(attendee_id, session)?)
    }

    /// Sessions the attendee registered for, in calendar order.
    pub fn sessions_for(&self, attendee_id: AttendeeId) -> GateResult<Vec<Session>> {
        Ok(self.repo.list_sessions(attendee_id)?)
    }
}
