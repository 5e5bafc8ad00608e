//! Transaction boundary for flows that write more than one table.
//!
//! # Invariants
//! - Writes made inside `atomically` persist only when the closure returns
//!   `Ok`; any error rolls all of them back.
//! - Transactions start `IMMEDIATE`, so the write lock is held from the first
//!   read of the flow.

use crate::repo::attendee_repo::RepoError;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs a unit of work all-or-nothing.
pub trait TransactionScope {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>;
}

impl<S: TransactionScope + ?Sized> TransactionScope for &S {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        (**self).atomically(work)
    }
}

/// SQLite transaction over the connection shared by the repositories.
#[derive(Clone, Copy)]
pub struct SqliteTransactionScope<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTransactionScope<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TransactionScope for SqliteTransactionScope<'_> {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<RepoError>,
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        // Dropping `tx` on the error path rolls back.
        let value = work()?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}
