//! Subcommand implementations. Each returns the text printed on success.

use crate::config::GateConfig;
use crate::error::CliError;
use gatepass_core::db::open_db;
use gatepass_core::{
    default_log_level, encode_credential, AttendeeId, GateValidator, NewAttendee, Session,
    SqliteRegistrationDesk,
};
use log::info;
use std::io::Read;
use std::path::Path;

/// Starts file logging when `logging.dir` is configured.
pub fn init_logging(config: &GateConfig) -> Result<(), CliError> {
    let Some(dir) = config.logging.dir.as_ref() else {
        return Ok(());
    };
    let level = config
        .logging
        .level
        .as_deref()
        .unwrap_or_else(|| default_log_level());
    let dir = dir
        .to_str()
        .ok_or_else(|| CliError::Logging(format!("log dir `{}` is not UTF-8", dir.display())))?;
    gatepass_core::init_logging(level, dir).map_err(CliError::Logging)
}

pub fn register(
    db_path: &Path,
    fullname: String,
    email: String,
    institution: String,
    age: u8,
    session: Session,
) -> Result<String, CliError> {
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let profile = NewAttendee::new(fullname, email, institution, age);
    let credential = desk.register(&profile, session)?;
    Ok(encode_credential(&credential))
}

pub fn fetch(db_path: &Path, email: &str, session: Session) -> Result<String, CliError> {
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let credential = desk.fetch_credential(email, session)?;
    Ok(encode_credential(&credential))
}

pub fn check_in(
    db_path: &Path,
    credential: Option<String>,
    gate: Option<Session>,
) -> Result<String, CliError> {
    let payload = read_payload(credential)?;
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let gate = gate.map(GateValidator::new);
    let credential = desk.check_in(&payload, gate.as_ref())?;
    info!(
        "event=cli_check_in module=cli status=ok gate={}",
        gate.map_or("any", |gate| gate.session().code())
    );
    Ok(format!(
        "checked in {} to {}",
        credential.attendee_id, credential.session
    ))
}

pub fn check_out(db_path: &Path, credential: Option<String>) -> Result<String, CliError> {
    let payload = read_payload(credential)?;
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let credential = desk.check_out(&payload)?;
    Ok(format!(
        "checked out {} from {}",
        credential.attendee_id, credential.session
    ))
}

pub fn status(db_path: &Path, attendee: AttendeeId, session: Session) -> Result<String, CliError> {
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let state = if desk.is_active(attendee, session)? {
        "present"
    } else {
        "absent"
    };
    Ok(state.to_string())
}

pub fn roster(db_path: &Path, session: Session) -> Result<String, CliError> {
    let conn = open_db(db_path)?;
    let desk = SqliteRegistrationDesk::open(&conn)?;
    let lines: Vec<String> = desk
        .roster(session)?
        .into_iter()
        .map(|attendee| format!("{}\t{}\t{}", attendee.id, attendee.fullname, attendee.institution))
        .collect();
    Ok(lines.join("\n"))
}

pub fn sessions(db_path: &Path, email: Option<&str>) -> Result<String, CliError> {
    let sessions = match email {
        Some(email) => {
            let conn = open_db(db_path)?;
            let desk = SqliteRegistrationDesk::open(&conn)?;
            desk.sessions_for(email)?
        }
        None => Session::ALL.to_vec(),
    };
    let lines: Vec<String> = sessions
        .into_iter()
        .map(|session| format!("{}\t{}", session.code(), session.label()))
        .collect();
    Ok(lines.join("\n"))
}

fn read_payload(arg: Option<String>) -> Result<String, CliError> {
    match arg {
        Some(payload) => Ok(payload),
        None => {
            let mut payload = String::new();
            std::io::stdin()
                .read_to_string(&mut payload)
                .map_err(|err| CliError::Input(format!("failed to read stdin: {err}")))?;
            Ok(payload)
        }
    }
}
