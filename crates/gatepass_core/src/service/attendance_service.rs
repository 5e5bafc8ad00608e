//! Attendance tracker: the per-(attendee, session) presence state machine.
//!
//! # Responsibility
//! - Move a pair between `Absent` and `Present` on check-in/check-out.
//! - Refuse presence for pairs that are not enrolled.
//!
//! # Invariants
//! - `Absent -> Present` only via `check_in`, `Present -> Absent` only via
//!   `check_out`; every other attempt fails and writes nothing.
//! - The enrollment read is a fast path; the schema's foreign key and unique
//!   key decide the outcome when calls race.

use crate::error::{GateError, GateResult};
use crate::model::attendee::AttendeeId;
use crate::model::session::Session;
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::attendee_repo::RepoError;
use crate::repo::enrollment_repo::EnrollmentRepository;
use log::{info, warn};

/// Presence state of one (attendee, session) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    Absent,
    Present,
}

pub struct AttendanceTracker<A: AttendanceRepository, E: EnrollmentRepository> {
    attendance: A,
    enrollments: E,
}

impl<A: AttendanceRepository, E: EnrollmentRepository> AttendanceTracker<A, E> {
    pub fn new(attendance: A, enrollments: E) -> Self {
        Self {
            attendance,
            enrollments,
        }
    }

    /// Marks the attendee present at `session`.
    ///
    /// # Errors
    /// - `NotEnrolled` when the pair has no enrollment.
    /// - `AlreadyCheckedIn` when the pair is already present.
    pub fn check_in(&self, attendee_id: AttendeeId, session: Session) -> GateResult<()> {
        if !self.enrollments.enrollment_exists(attendee_id, session)? {
            return Err(rejected(
                "check_in",
                "not_enrolled",
                GateError::NotEnrolled {
                    attendee_id,
                    session,
                },
            ));
        }

        match self.attendance.insert_attendance(attendee_id, session) {
            Ok(()) => {
                info!(
                    "event=check_in module=attendance status=ok attendee_id={attendee_id} session={}",
                    session.code()
                );
                Ok(())
            }
            Err(RepoError::Conflict(_)) => Err(rejected(
                "check_in",
                "already_checked_in",
                GateError::AlreadyCheckedIn {
                    attendee_id,
                    session,
                },
            )),
            Err(RepoError::MissingParent(_)) => Err(rejected(
                "check_in",
                "not_enrolled",
                GateError::NotEnrolled {
                    attendee_id,
                    session,
                },
            )),
            Err(err) => Err(err.into()),
        }
    }

    /// Marks the attendee as having left `session`.
    ///
    /// # Errors
    /// - `NotCheckedIn` when the pair is not present.
    pub fn check_out(&self, attendee_id: AttendeeId, session: Session) -> GateResult<()> {
        if !self.attendance.delete_attendance(attendee_id, session)? {
            return Err(rejected(
                "check_out",
                "not_checked_in",
                GateError::NotCheckedIn {
                    attendee_id,
                    session,
                },
            ));
        }

        info!(
            "event=check_out module=attendance status=ok attendee_id={attendee_id} session={}",
            session.code()
        );
        Ok(())
    }

    pub fn is_active(&self, attendee_id: AttendeeId, session: Session) -> GateResult<bool> {
        Ok(self.attendance.attendance_exists(attendee_id, session)?)
    }

    pub fn state(&self, attendee_id: AttendeeId, session: Session) -> GateResult<PresenceState> {
        if self.is_active(attendee_id, session)? {
            Ok(PresenceState::Present)
        } else {
            Ok(PresenceState::Absent)
        }
    }

    /// Attendees currently present at `session`, earliest arrival first.
    pub fn present_at(&self, session: Session) -> GateResult<Vec<AttendeeId>> {
        Ok(self.attendance.list_present(session)?)
    }
}

fn rejected(event: &str, error_code: &str, err: GateError) -> GateError {
    warn!("event={event} module=attendance status=rejected error_code={error_code} error={err}");
    err
}
