//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for attendees,
//!   enrollments and attendance.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Uniqueness collisions surface as `RepoError::Conflict`, never as a raw
//!   SQLite error.
//! - Repository constructors refuse connections whose schema is not fully
//!   migrated.
//! - Multi-table writes run inside a `TransactionScope`.

pub mod attendance_repo;
pub mod attendee_repo;
pub mod enrollment_repo;
mod schema;
pub mod transaction;
