//! Attendance repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist "currently present" rows per (attendee, session).
//!
//! # Invariants
//! - At most one `attendance` row per pair (unique key).
//! - Every row references an existing enrollment (composite foreign key); an
//!   insert without one fails with `RepoError::MissingParent`.
//! - Check-out hard-deletes the row so the pair can be checked in again.

use crate::model::attendee::AttendeeId;
use crate::model::session::Session;
use crate::repo::attendee_repo::{map_insert_error, parse_attendee_id, RepoResult};
use crate::repo::schema::ensure_table_ready;
use rusqlite::{params, Connection};

/// Repository interface for live attendance.
pub trait AttendanceRepository {
    /// Inserts a presence row.
    ///
    /// Fails with `Conflict` when already present and `MissingParent` when the
    /// pair is not enrolled.
    fn insert_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()>;
    /// Deletes a presence row; returns whether one existed.
    fn delete_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool>;
    fn attendance_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool>;
    /// Lists attendees present at `session`, earliest check-in first.
    fn list_present(&self, session: Session) -> RepoResult<Vec<AttendeeId>>;
}

impl<R: AttendanceRepository + ?Sized> AttendanceRepository for &R {
    fn insert_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()> {
        (**self).insert_attendance(attendee_id, session)
    }

    fn delete_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        (**self).delete_attendance(attendee_id, session)
    }

    fn attendance_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        (**self).attendance_exists(attendee_id, session)
    }

    fn list_present(&self, session: Session) -> RepoResult<Vec<AttendeeId>> {
        (**self).list_present(session)
    }
}

/// SQLite-backed attendance repository.
#[derive(Clone, Copy)]
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "attendance",
            &["attendee_id", "session", "checked_in_at"],
        )?;
        Ok(Self { conn })
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn insert_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO attendance (attendee_id, session) VALUES (?1, ?2);",
                params![attendee_id.to_string(), session.label()],
            )
            .map_err(|err| map_insert_error("attendance", err))?;
        Ok(())
    }

    fn delete_attendance(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM attendance WHERE attendee_id = ?1 AND session = ?2;",
            params![attendee_id.to_string(), session.label()],
        )?;
        Ok(changed > 0)
    }

    fn attendance_exists(&self, attendee_id: AttendeeId, session: Session) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM attendance
                WHERE attendee_id = ?1 AND session = ?2
            );",
            params![attendee_id.to_string(), session.label()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_present(&self, session: Session) -> RepoResult<Vec<AttendeeId>> {
        let mut stmt = self.conn.prepare(
            "SELECT attendee_id
             FROM attendance
             WHERE session = ?1
             ORDER BY checked_in_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([session.label()])?;
        let mut present = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get(0)?;
            present.push(parse_attendee_id(&id_text, "attendance.attendee_id")?);
        }
        Ok(present)
    }
}
