//! Enrollment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - At most one `enrollments` row per (attendee, session); the unique key
//!   rejects the losing writer of a concurrent double registration.
//! - Rows are immutable and never deleted.

use crate::model::attendee::AttendeeId;
use crate::model::session::Session;
use crate::repo::attendee_repo::{map_insert_error, RepoError, RepoResult};
use crate::repo::schema::ensure_table_ready;
use rusqlite::{params, Connection};

/// Repository interface for session enrollments.
pub trait EnrollmentRepository {
    /// Inserts one enrollment. Fails with `Conflict` when the pair exists.
    fn insert_enrollment(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()>;
    fn enrollment_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool>;
    /// Lists enrolled sessions in calendar order.
    fn list_sessions(&self, attendee_id: AttendeeId) -> RepoResult<Vec<Session>>;
}

impl<R: EnrollmentRepository + ?Sized> EnrollmentRepository for &R {
    fn insert_enrollment(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()> {
        (**self).insert_enrollment(attendee_id, session)
    }

    fn enrollment_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        (**self).enrollment_exists(attendee_id, session)
    }

    fn list_sessions(&self, attendee_id: AttendeeId) -> RepoResult<Vec<Session>> {
        (**self).list_sessions(attendee_id)
    }
}

/// SQLite-backed enrollment repository.
#[derive(Clone, Copy)]
pub struct SqliteEnrollmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEnrollmentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "enrollments", &["attendee_id", "session"])?;
        Ok(Self { conn })
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn insert_enrollment(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO enrollments (attendee_id, session) VALUES (?1, ?2);",
                params![attendee_id.to_string(), session.label()],
            )
            .map_err(|err| map_insert_error("enrollments", err))?;
        Ok(())
    }

    fn enrollment_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM enrollments
                WHERE attendee_id = ?1 AND session = ?2
            );",
            params![attendee_id.to_string(), session.label()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_sessions(&self, attendee_id: AttendeeId) -> RepoResult<Vec<Session>> {
        let mut stmt = self
            .conn
            .prepare("SELECT session FROM enrollments WHERE attendee_id = ?1;")?;
        let mut rows = stmt.query([attendee_id.to_string()])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            let label: String = row.get(0)?;
            let session = label.parse::<Session>().map_err(|_| {
                RepoError::InvalidData(format!("invalid session `{label}` in enrollments.session"))
            })?;
            sessions.push(session);
        }
        sessions.sort();
        Ok(sessions)
    }
}
