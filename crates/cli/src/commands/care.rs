//! Link and appointment commands.

use carelink_core::NationalId;
use carelink_registry::models::LinkOutcome;
use chrono::NaiveDate;
use clap::Subcommand;

use super::{CliError, open_service};

/// Date format the registry displays and accepts (plus ISO as a fallback).
const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Subcommand)]
pub enum AppointmentAction {
    /// Schedule an appointment for a patient
    Add {
        /// Patient national id
        #[arg(long)]
        patient: String,

        /// Appointment date (DD/MM/YYYY or YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List a patient's appointments in chronological order
    List {
        /// Patient national id
        #[arg(long)]
        patient: String,
    },
}

pub async fn link(patient: &str, caregiver: &str) -> Result<(), CliError> {
    let patient = NationalId::parse(patient).map_err(CliError::input)?;
    let caregiver = NationalId::parse(caregiver).map_err(CliError::input)?;

    let service = open_service().await?;
    match service.link_caregiver(&patient, &caregiver).await? {
        LinkOutcome::Created => {
            println!("Linked patient {patient} to caregiver {caregiver}.");
        }
        LinkOutcome::AlreadyLinked => {
            println!("Patient {patient} is already linked to caregiver {caregiver}.");
        }
    }
    Ok(())
}

pub async fn appointment(action: AppointmentAction) -> Result<(), CliError> {
    match action {
        AppointmentAction::Add { patient, date } => add(&patient, &date).await,
        AppointmentAction::List { patient } => list(&patient).await,
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| CliError::Input(format!("invalid date {raw:?}, expected DD/MM/YYYY")))
}

async fn add(patient: &str, date: &str) -> Result<(), CliError> {
    let patient = NationalId::parse(patient).map_err(CliError::input)?;
    let date = parse_date(date)?;

    let service = open_service().await?;
    service.schedule_appointment(&patient, date).await?;

    println!(
        "Appointment scheduled for {} for patient {patient}.",
        date.format(DATE_FORMAT)
    );
    Ok(())
}

async fn list(patient: &str) -> Result<(), CliError> {
    let patient = NationalId::parse(patient).map_err(CliError::input)?;

    let service = open_service().await?;
    let dates = service.appointments_for(&patient).await?;

    if dates.is_empty() {
        println!("No appointments found for patient {patient}.");
        return Ok(());
    }

    println!("Appointments for patient {patient}:");
    for (i, date) in dates.iter().enumerate() {
        println!("{}. {}", i + 1, date.format(DATE_FORMAT));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registry_and_iso_dates() {
        let expected = NaiveDate::from_ymd_opt(2026, 9, 3).expect("valid date");
        assert_eq!(parse_date("03/09/2026").expect("valid"), expected);
        assert_eq!(parse_date("2026-09-03").expect("valid"), expected);
        assert!(parse_date("2026/09/03").is_err());
    }
}
