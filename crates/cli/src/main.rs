//! CareLink CLI - registry operations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Initialize the database
//! carelink migrate
//!
//! # Register a patient with address auto-fill
//! carelink patient register --national-id 11122233344 --name "João da Silva" \
//!     --age 72 --email joao@example.com --phone "11 99999-0000" \
//!     --postal-code 01310-930 --number 100
//!
//! # Register with a manual address (fallback when resolution fails)
//! carelink patient register --national-id 11122233344 --name "João da Silva" \
//!     --age 72 --email joao@example.com --phone "11 99999-0000" \
//!     --number 100 --street "Av. Paulista" --district "Bela Vista" \
//!     --city "São Paulo" --region SP
//!
//! # Link, schedule, export
//! carelink link --patient 11122233344 --caregiver 55566677788
//! carelink appointment add --patient 11122233344 --date 03/09/2026
//! carelink export --output patients.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use carelink_registry::RegistryError;
use commands::CliError;

#[derive(Parser)]
#[command(name = "carelink")]
#[command(author, version, about = "CareLink patient/caregiver registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage patient records
    Patient {
        #[command(subcommand)]
        action: commands::person::PatientAction,
    },
    /// Manage caregiver records
    Caregiver {
        #[command(subcommand)]
        action: commands::person::CaregiverAction,
    },
    /// Link a patient to a caregiver
    Link {
        /// Patient national id
        #[arg(long)]
        patient: String,

        /// Caregiver national id
        #[arg(long)]
        caregiver: String,
    },
    /// Manage appointments
    Appointment {
        #[command(subcommand)]
        action: commands::care::AppointmentAction,
    },
    /// Export all patients to a JSON file
    Export {
        /// Output file path
        #[arg(short, long, default_value = "patients.json")]
        output: PathBuf,
    },
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Patient { action } => commands::person::patient(action).await,
        Commands::Caregiver { action } => commands::person::caregiver(action).await,
        Commands::Link { patient, caregiver } => commands::care::link(&patient, &caregiver).await,
        Commands::Appointment { action } => commands::care::appointment(action).await,
        Commands::Export { output } => commands::export::run(&output).await,
    }
}

/// Print a distinct, human-readable status for each failure kind.
fn report(err: &CliError) {
    match err {
        CliError::Input(msg) => eprintln!("Invalid input: {msg}"),
        CliError::Config(e) => eprintln!("Configuration error: {e}"),
        CliError::Registry(e) => match e {
            RegistryError::Validation(msg) => eprintln!("Invalid input: {msg}"),
            RegistryError::NotFound(what) => eprintln!("Not found: {what}"),
            RegistryError::AlreadyExists(what) => eprintln!("Already exists: {what}"),
            RegistryError::Integrity(msg) => {
                eprintln!("Dependency conflict: {msg}");
                eprintln!("Remove the dependent records first, then retry.");
            }
            RegistryError::Resolution(cause) => {
                eprintln!("Could not resolve the address automatically: {cause}");
                eprintln!(
                    "Re-run with the manual address flags: --street --district --city --region."
                );
            }
            RegistryError::Storage(cause) => eprintln!("Storage failure: {cause}"),
            other => eprintln!("Error: {other}"),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "carelink_cli=warn,carelink_registry=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
