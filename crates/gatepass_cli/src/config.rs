//! `gatepass.toml` configuration.
//!
//! ```toml
//! [database]
//! path = "/var/lib/gatepass/gatepass.db"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/gatepass"
//!
//! [gate]
//! session = "sat"
//! ```
//!
//! Every section is optional. Logging stays off unless `logging.dir` is set.

use crate::error::CliError;
use gatepass_core::Session;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE: &str = "gatepass.db";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub gate: GateSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Falls back to the build-mode default when unset.
    pub level: Option<String>,
    /// Absolute directory for rolling log files.
    pub dir: Option<PathBuf>,
}

/// Session this terminal guards when used as an entry gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSection {
    pub session: Option<String>,
}

impl GateConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|err| {
            CliError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::parse(&text)
            .map_err(|err| CliError::Config(format!("failed to parse {}: {err}", path.display())))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parses `gate.session` into a known session.
    pub fn gate_session(&self) -> Result<Option<Session>, CliError> {
        self.gate
            .session
            .as_deref()
            .map(|label| label.parse::<Session>().map_err(CliError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::GateConfig;
    use gatepass_core::Session;
    use std::path::PathBuf;

    #[test]
    fn empty_file_uses_defaults() {
        let config = GateConfig::parse("").unwrap();
        assert_eq!(config.database.path, PathBuf::from("gatepass.db"));
        assert_eq!(config.logging.dir, None);
        assert_eq!(config.gate_session().unwrap(), None);
    }

    #[test]
    fn full_file_parses_every_section() {
        let config = GateConfig::parse(
            r#"
            [database]
            path = "/tmp/gp.db"

            [logging]
            level = "debug"
            dir = "/tmp/gp-logs"

            [gate]
            session = "Saturday, January 25th, 2025"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.path, PathBuf::from("/tmp/gp.db"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.gate_session().unwrap(), Some(Session::Saturday));
    }

    #[test]
    fn unknown_keys_and_sessions_are_rejected() {
        assert!(GateConfig::parse("[database]\nfile = \"x.db\"\n").is_err());
        let config = GateConfig::parse("[gate]\nsession = \"Monday\"\n").unwrap();
        assert!(config.gate_session().is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GateConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, GateConfig::default());
    }
}
