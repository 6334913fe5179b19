//! Patient and caregiver commands.
//!
//! Both roles share the same record shape and handlers; the clap surface
//! differs only in that the minimum-age filter applies to patients.

use carelink_core::{Email, NationalId, PersonRole, PostalCode};
use carelink_registry::models::{AddressPatch, AddressSource, NewAddress, NewPerson, PersonPatch};
use clap::{Args, Subcommand};

use super::{CliError, open_service};

#[derive(Subcommand)]
pub enum PatientAction {
    /// Register a new patient
    Register(RegisterArgs),
    /// Show one patient by national id
    Show {
        /// National id to look up
        national_id: String,
    },
    /// List all patients, ordered by name
    List,
    /// List patients at or above a minimum age, oldest first
    FilterAge {
        /// Minimum age in years
        min_age: u32,
    },
    /// Update a patient record (only the supplied fields change)
    Update(UpdateArgs),
    /// Remove a patient and their address
    Remove {
        /// National id to remove
        national_id: String,
    },
}

#[derive(Subcommand)]
pub enum CaregiverAction {
    /// Register a new caregiver
    Register(RegisterArgs),
    /// Show one caregiver by national id
    Show {
        /// National id to look up
        national_id: String,
    },
    /// List all caregivers, ordered by name
    List,
    /// Update a caregiver record (only the supplied fields change)
    Update(UpdateArgs),
    /// Remove a caregiver and their address
    Remove {
        /// National id to remove
        national_id: String,
    },
}

#[derive(Args)]
pub struct RegisterArgs {
    /// National id (CPF-style digit string)
    #[arg(long)]
    national_id: String,

    /// Full name
    #[arg(long)]
    name: String,

    /// Age in years
    #[arg(long)]
    age: u32,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone
    #[arg(long)]
    phone: String,

    /// 8-digit postal code; street/district/city/region are auto-filled
    #[arg(long)]
    postal_code: Option<String>,

    /// Street number
    #[arg(long)]
    number: String,

    /// Address complement (apartment, unit, ...)
    #[arg(long)]
    complement: Option<String>,

    /// Street name (manual entry, when no postal code is given)
    #[arg(long)]
    street: Option<String>,

    /// District (manual entry)
    #[arg(long)]
    district: Option<String>,

    /// City (manual entry)
    #[arg(long)]
    city: Option<String>,

    /// Region/state code, e.g. SP (manual entry)
    #[arg(long)]
    region: Option<String>,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// National id of the record to update
    #[arg(long)]
    national_id: String,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New age
    #[arg(long)]
    age: Option<u32>,

    /// New email
    #[arg(long)]
    email: Option<String>,

    /// New phone
    #[arg(long)]
    phone: Option<String>,

    /// New street
    #[arg(long)]
    street: Option<String>,

    /// New street number
    #[arg(long)]
    number: Option<String>,

    /// New complement
    #[arg(long)]
    complement: Option<String>,
}

pub async fn patient(action: PatientAction) -> Result<(), CliError> {
    let role = PersonRole::Patient;
    match action {
        PatientAction::Register(args) => register(role, args).await,
        PatientAction::Show { national_id } => show(role, &national_id).await,
        PatientAction::List => list(role).await,
        PatientAction::FilterAge { min_age } => filter_age(min_age).await,
        PatientAction::Update(args) => update(role, args).await,
        PatientAction::Remove { national_id } => remove(role, &national_id).await,
    }
}

pub async fn caregiver(action: CaregiverAction) -> Result<(), CliError> {
    let role = PersonRole::Caregiver;
    match action {
        CaregiverAction::Register(args) => register(role, args).await,
        CaregiverAction::Show { national_id } => show(role, &national_id).await,
        CaregiverAction::List => list(role).await,
        CaregiverAction::Update(args) => update(role, args).await,
        CaregiverAction::Remove { national_id } => remove(role, &national_id).await,
    }
}

fn manual_field(name: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError::Input(format!("--{name} is required without --postal-code")))
}

async fn register(role: PersonRole, args: RegisterArgs) -> Result<(), CliError> {
    let person = NewPerson {
        national_id: NationalId::parse(&args.national_id).map_err(CliError::input)?,
        name: args.name,
        age: args.age,
        email: Email::parse(&args.email).map_err(CliError::input)?,
        phone: args.phone,
    };

    let source = match args.postal_code {
        Some(code) => AddressSource::PostalCode {
            code: PostalCode::parse(&code).map_err(CliError::input)?,
            number: args.number,
            complement: args.complement,
        },
        None => AddressSource::Manual(NewAddress {
            postal_code: None,
            street: manual_field("street", args.street)?,
            number: args.number,
            complement: args.complement,
            district: manual_field("district", args.district)?,
            city: manual_field("city", args.city)?,
            region: manual_field("region", args.region)?,
        }),
    };

    let service = open_service().await?;
    let stored = service.register_person(role, person, source).await?;

    println!(
        "Registered {} {} ({})",
        role.label(),
        stored.name,
        stored.national_id
    );
    println!("  Address: {}", stored.address_line());
    Ok(())
}

async fn show(role: PersonRole, national_id: &str) -> Result<(), CliError> {
    let id = NationalId::parse(national_id).map_err(CliError::input)?;

    let service = open_service().await?;
    let person = service.find_person(role, &id).await?;

    println!("{}: {}", capitalize(role.label()), person.name);
    println!("  National id: {}", person.national_id);
    println!("  Age: {}", person.age);
    println!("  Email: {}", person.email);
    println!("  Phone: {}", person.phone);
    println!("  Address: {}", person.address_line());
    Ok(())
}

async fn list(role: PersonRole) -> Result<(), CliError> {
    let service = open_service().await?;
    let persons = service.list_persons(role).await?;

    if persons.is_empty() {
        println!("No {}s registered.", role.label());
        return Ok(());
    }

    for person in persons {
        println!(
            "- {} ({}), {} years - {}",
            person.name,
            person.national_id,
            person.age,
            person.address_line()
        );
    }
    Ok(())
}

async fn filter_age(min_age: u32) -> Result<(), CliError> {
    let service = open_service().await?;
    let persons = service.patients_with_min_age(min_age).await?;

    if persons.is_empty() {
        println!("No patients aged {min_age} or more.");
        return Ok(());
    }

    println!("Patients aged {min_age} or more:");
    for (i, person) in persons.iter().enumerate() {
        println!(
            "{}. {} ({} years) - {}",
            i + 1,
            person.name,
            person.age,
            person.address_line()
        );
    }
    Ok(())
}

async fn update(role: PersonRole, args: UpdateArgs) -> Result<(), CliError> {
    let id = NationalId::parse(&args.national_id).map_err(CliError::input)?;

    let email = args
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(CliError::input)?;

    let person = PersonPatch {
        name: args.name,
        age: args.age,
        email,
        phone: args.phone,
    };
    let address = AddressPatch {
        street: args.street,
        number: args.number,
        complement: args.complement,
    };

    let service = open_service().await?;
    service.update_person(role, &id, &person, &address).await?;

    println!("Updated {} {id}.", role.label());
    Ok(())
}

async fn remove(role: PersonRole, national_id: &str) -> Result<(), CliError> {
    let id = NationalId::parse(national_id).map_err(CliError::input)?;

    let service = open_service().await?;
    service.delete_person(role, &id).await?;

    println!("Removed {} {id} and their address.", role.label());
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
