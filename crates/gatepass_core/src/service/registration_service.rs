//! Registration desk: the operation surface used by ticketing and gate
//! collaborators.
//!
//! # Responsibility
//! - Compose identity, enrollment, codec, gate and attendance steps into the
//!   register / reissue / check-in / check-out flows.
//!
//! # Invariants
//! - Each flow performs at most one insert or delete per table it touches.
//! - Registration creates the attendee and the enrollment in one transaction;
//!   a failed enrollment leaves no attendee row behind.
//! - A gate mismatch stops the check-in flow before attendance is read or
//!   written.

use crate::codec;
use crate::error::{GateError, GateResult};
use crate::model::attendee::{Attendee, AttendeeId, NewAttendee};
use crate::model::credential::Credential;
use crate::model::session::Session;
use crate::repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
use crate::repo::attendee_repo::{AttendeeRepository, RepoResult, SqliteAttendeeRepository};
use crate::repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
use crate::repo::transaction::{SqliteTransactionScope, TransactionScope};
use crate::service::attendance_service::AttendanceTracker;
use crate::service::enrollment_service::EnrollmentLedger;
use crate::service::gate::GateValidator;
use crate::service::identity_service::IdentityResolver;
use rusqlite::Connection;

/// Desk wired to SQLite repositories sharing one connection.
pub type SqliteRegistrationDesk<'conn> = RegistrationDesk<
    SqliteAttendeeRepository<'conn>,
    SqliteEnrollmentRepository<'conn>,
    SqliteAttendanceRepository<'conn>,
    SqliteTransactionScope<'conn>,
>;

/// Facade over the ledger services, generic over injected storage.
pub struct RegistrationDesk<A, E, T, X>
where
    A: AttendeeRepository,
    E: EnrollmentRepository,
    T: AttendanceRepository,
    X: TransactionScope,
{
    attendees: A,
    enrollments: E,
    attendance: T,
    transactions: X,
}

impl<'conn> SqliteRegistrationDesk<'conn> {
    /// Builds a desk over a migrated connection.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(RegistrationDesk::new(
            SqliteAttendeeRepository::try_new(conn)?,
            SqliteEnrollmentRepository::try_new(conn)?,
            SqliteAttendanceRepository::try_new(conn)?,
            SqliteTransactionScope::new(conn),
        ))
    }
}

impl<A, E, T, X> RegistrationDesk<A, E, T, X>
where
    A: AttendeeRepository,
    E: EnrollmentRepository,
    T: AttendanceRepository,
    X: TransactionScope,
{
    pub fn new(attendees: A, enrollments: E, attendance: T, transactions: X) -> Self {
        Self {
            attendees,
            enrollments,
            attendance,
            transactions,
        }
    }

    /// Registers `profile` for `session` and issues its credential.
    ///
    /// A returning email reuses the stored attendee; the supplied profile is
    /// then ignored. Nothing is persisted unless the enrollment succeeds.
    ///
    /// # Errors
    /// - `InvalidProfile` when the form input is rejected.
    /// - `AlreadyRegisteredForSession` when this email already holds `session`.
    pub fn register(&self, profile: &NewAttendee, session: Session) -> GateResult<Credential> {
        self.transactions.atomically(|| -> GateResult<Credential> {
            let attendee_id = self.identity().resolve_or_create(profile)?;
            self.ledger().enroll(attendee_id, session)?;
            Ok(Credential::new(attendee_id, session))
        })
    }

    /// Re-issues the credential for an existing registration.
    ///
    /// # Errors
    /// - `AttendeeNotFound` when no attendee uses `email`.
    /// - `NotEnrolled` when the attendee never registered for `session`.
    pub fn fetch_credential(&self, email: &str, session: Session) -> GateResult<Credential> {
        let attendee_id = self.identity().lookup_by_email(email)?;
        if !self.ledger().is_enrolled(attendee_id, session)? {
            return Err(GateError::NotEnrolled {
                attendee_id,
                session,
            });
        }
        Ok(Credential::new(attendee_id, session))
    }

    /// Admits the holder of a scanned credential.
    ///
    /// When `gate` is given, the credential must be for the gate's session.
    pub fn check_in(&self, payload: &str, gate: Option<&GateValidator>) -> GateResult<Credential> {
        let credential = codec::decode(payload)?;
        if let Some(gate) = gate {
            gate.match_session(credential.session)?;
        }
        self.tracker()
            .check_in(credential.attendee_id, credential.session)?;
        Ok(credential)
    }

    /// Records that the holder of a scanned credential left.
    pub fn check_out(&self, payload: &str) -> GateResult<Credential> {
        let credential = codec::decode(payload)?;
        self.tracker()
            .check_out(credential.attendee_id, credential.session)?;
        Ok(credential)
    }

    pub fn is_active(&self, attendee_id: AttendeeId, session: Session) -> GateResult<bool> {
        self.tracker().is_active(attendee_id, session)
    }

    /// Attendees currently inside for `session`.
    pub fn roster(&self, session: Session) -> GateResult<Vec<Attendee>> {
        let identity = self.identity();
        self.tracker()
            .present_at(session)?
            .into_iter()
            .map(|attendee_id| identity.get(attendee_id))
            .collect()
    }

    /// Sessions registered under `email`, in calendar order.
    pub fn sessions_for(&self, email: &str) -> GateResult<Vec<Session>> {
        let attendee_id = self.identity().lookup_by_email(email)?;
        self.ledger().sessions_for(attendee_id)
    }

    fn identity(&self) -> IdentityResolver<&A> {
        IdentityResolver::new(&self.attendees)
    }

    fn ledger(&self) -> EnrollmentLedger<&E> {
        EnrollmentLedger::new(&self.enrollments)
    }

    fn tracker(&self) -> AttendanceTracker<&T, &E> {
        AttendanceTracker::new(&self.attendance, &self.enrollments)
    }
}
