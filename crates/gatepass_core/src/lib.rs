//! Core ledger for event registration and gate attendance.
//! This crate is the single source of truth for registration invariants.

pub mod codec;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::{decode as decode_credential, encode as encode_credential, MalformedCredential};
pub use error::{ErrorKind, GateError, GateResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendee::{Attendee, AttendeeId, AttendeeValidationError, NewAttendee};
pub use model::credential::Credential;
pub use model::session::{Session, UnknownSessionError};
pub use repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
pub use repo::attendee_repo::{AttendeeRepository, RepoError, RepoResult, SqliteAttendeeRepository};
pub use repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use repo::transaction::{SqliteTransactionScope, TransactionScope};
pub use service::attendance_service::{AttendanceTracker, PresenceState};
pub use service::enrollment_service::EnrollmentLedger;
pub use service::gate::GateValidator;
pub use service::identity_service::IdentityResolver;
pub use service::registration_service::{RegistrationDesk, SqliteRegistrationDesk};
