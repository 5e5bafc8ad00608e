//! Attendee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist attendee identities keyed by email.
//! - Define the shared repository error type.
//!
//! # Invariants
//! - `attendees.email` is unique; a second insert for the same email fails
//!   with `RepoError::Conflict` and leaves the first row untouched.
//! - Stored rows are never updated or deleted.

use crate::db::{constraint_violation, ConstraintKind, DbError};
use crate::model::attendee::{Attendee, AttendeeId};
use crate::repo::schema::ensure_table_ready;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ledger persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or SQL failure.
    Db(DbError),
    /// Insert collided with a uniqueness constraint on `table`.
    Conflict(&'static str),
    /// Insert into `table` referenced a parent row that does not exist.
    MissingParent(&'static str),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict(table) => write!(f, "duplicate row in `{table}`"),
            Self::MissingParent(table) => {
                write!(f, "row in `{table}` references a missing parent")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "repository requires table `{table}`"),
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Classifies a failed insert into `table`.
pub(crate) fn map_insert_error(table: &'static str, err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(ConstraintKind::Unique) => RepoError::Conflict(table),
        Some(ConstraintKind::ForeignKey) => RepoError::MissingParent(table),
        None => err.into(),
    }
}

pub(crate) fn parse_attendee_id(value: &str, column: &str) -> RepoResult<AttendeeId> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Repository interface for attendee identities.
pub trait AttendeeRepository {
    /// Inserts a new attendee. Fails with `Conflict` when the email is taken.
    fn insert_attendee(&self, attendee: &Attendee) -> RepoResult<()>;
    fn find_id_by_email(&self, email: &str) -> RepoResult<Option<AttendeeId>>;
    fn get_attendee(&self, id: AttendeeId) -> RepoResult<Option<Attendee>>;
}

impl<R: AttendeeRepository + ?Sized> AttendeeRepository for &R {
    fn insert_attendee(&self, attendee: &Attendee) -> RepoResult<()> {
        (**self).insert_attendee(attendee)
    }

    fn find_id_by_email(&self, email: &str) -> RepoResult<Option<AttendeeId>> {
        (**self).find_id_by_email(email)
    }

    fn get_attendee(&self, id: AttendeeId) -> RepoResult<Option<Attendee>> {
        (**self).get_attendee(id)
    }
}

/// SQLite-backed attendee repository.
#[derive(Clone, Copy)]
pub struct SqliteAttendeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendeeRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(
            conn,
            "attendees",
            &["id", "fullname", "email", "institution", "age"],
        )?;
        Ok(Self { conn })
    }
}

impl AttendeeRepository for SqliteAttendeeRepository<'_> {
    fn insert_attendee(&self, attendee: &Attendee) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO attendees (id, fullname, email, institution, age)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    attendee.id.to_string(),
                    attendee.fullname.as_str(),
                    attendee.email.as_str(),
                    attendee.institution.as_str(),
                    attendee.age,
                ],
            )
            .map_err(|err| map_insert_error("attendees", err))?;
        Ok(())
    }

    fn find_id_by_email(&self, email: &str) -> RepoResult<Option<AttendeeId>> {
        let id_text: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM attendees WHERE email = ?1 LIMIT 1;",
                [email],
                |row| row.get(0),
            )
            .optional()?;

        id_text
            .map(|value| parse_attendee_id(&value, "attendees.id"))
            .transpose()
    }

    fn get_attendee(&self, id: AttendeeId) -> RepoResult<Option<Attendee>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, fullname, email, institution, age
             FROM attendees
             WHERE id = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_attendee_row(row)?));
        }
        Ok(None)
    }
}

fn parse_attendee_row(row: &Row<'_>) -> RepoResult<Attendee> {
    let id_text: String = row.get("id")?;
    let age: i64 = row.get("age")?;
    let age = u8::try_from(age)
        .map_err(|_| RepoError::InvalidData(format!("invalid age `{age}` in attendees.age")))?;

    Ok(Attendee {
        id: parse_attendee_id(&id_text, "attendees.id")?,
        fullname: row.get("fullname")?,
        email: row.get("email")?,
        institution: row.get("institution")?,
        age,
    })
}
