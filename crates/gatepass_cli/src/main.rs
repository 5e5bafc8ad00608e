//! `gatepass` command-line front end for the registration ledger.
//!
//! Each subcommand opens the configured SQLite database, runs one ledger
//! operation and prints either the credential payload or a one-line status.

use clap::{Parser, Subcommand};
use gatepass_core::Session;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::GateConfig;

#[derive(Parser)]
#[command(name = "gatepass")]
#[command(about = "Event registration and gate attendance ledger", version)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "gatepass.toml")]
    config: PathBuf,
    /// Database file (overrides `database.path`)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register an attendee for a session and print the credential
    Register {
        #[arg(long)]
        fullname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        institution: String,
        #[arg(long)]
        age: u8,
        /// Session label or day code (fri|sat|sun)
        #[arg(long, value_parser = parse_session)]
        session: Session,
    },
    /// Re-issue the credential of an existing registration
    Fetch {
        #[arg(long)]
        email: String,
        #[arg(long, value_parser = parse_session)]
        session: Session,
    },
    /// Check in a scanned credential
    CheckIn {
        /// Credential JSON (or stdin if not provided)
        credential: Option<String>,
        /// Only admit credentials for this session (overrides `gate.session`)
        #[arg(long, value_parser = parse_session)]
        gate: Option<Session>,
    },
    /// Check out a scanned credential
    CheckOut {
        /// Credential JSON (or stdin if not provided)
        credential: Option<String>,
    },
    /// Show whether an attendee is currently inside a session
    Status {
        #[arg(long)]
        attendee: uuid::Uuid,
        #[arg(long, value_parser = parse_session)]
        session: Session,
    },
    /// List attendees currently inside a session
    Roster {
        #[arg(long, value_parser = parse_session)]
        session: Session,
    },
    /// List known sessions, or the sessions an email registered for
    Sessions {
        #[arg(long)]
        email: Option<String>,
    },
}

fn parse_session(value: &str) -> Result<Session, String> {
    value.parse::<Session>().map_err(|err| err.to_string())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), error::CliError> {
    let config = GateConfig::load(&cli.config)?;
    commands::init_logging(&config)?;
    let db_path = cli.db.unwrap_or_else(|| config.database.path.clone());

    let output = match cli.command {
        Commands::Register {
            fullname,
            email,
            institution,
            age,
            session,
        } => commands::register(&db_path, fullname, email, institution, age, session)?,
        Commands::Fetch { email, session } => commands::fetch(&db_path, &email, session)?,
        Commands::CheckIn { credential, gate } => {
            let gate = match gate {
                Some(session) => Some(session),
                None => config.gate_session()?,
            };
            commands::check_in(&db_path, credential, gate)?
        }
        Commands::CheckOut { credential } => commands::check_out(&db_path, credential)?,
        Commands::Status { attendee, session } => commands::status(&db_path, attendee, session)?,
        Commands::Roster { session } => commands::roster(&db_path, session)?,
        Commands::Sessions { email } => commands::sessions(&db_path, email.as_deref())?,
    };

    println!("{output}");
    Ok(())
}
