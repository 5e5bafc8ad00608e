//! CLI error type and exit codes.

use gatepass_core::db::DbError;
use gatepass_core::{GateError, RepoError, UnknownSessionError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Config(String),
    Logging(String),
    Input(String),
    Db(DbError),
    Repo(RepoError),
    Gate(GateError),
}

impl CliError {
    /// Process exit code: 1 for rejected operations, 2 for setup problems.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Gate(_) => 1,
            _ => 2,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "error[config]: {message}"),
            Self::Logging(message) => write!(f, "error[logging]: {message}"),
            Self::Input(message) => write!(f, "error[input]: {message}"),
            Self::Db(err) => write!(f, "error[storage]: {err}"),
            Self::Repo(err) => write!(f, "error[storage]: {err}"),
            Self::Gate(err) => write!(f, "error[{}]: {err}", err.kind().as_str()),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Gate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<GateError> for CliError {
    fn from(value: GateError) -> Self {
        Self::Gate(value)
    }
}

impl From<UnknownSessionError> for CliError {
    fn from(value: UnknownSessionError) -> Self {
        Self::Gate(value.into())
    }
}
