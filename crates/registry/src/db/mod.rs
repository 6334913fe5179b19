//! Database operations for the registry (`SQLite`).
//!
//! ## Tables
//!
//! - `addresses` - Structured addresses (generated key, one owner each)
//! - `patients` / `caregivers` - Same-shaped person tables keyed by national id
//! - `care_links` - Patient/caregiver associations (composite key)
//! - `appointments` - Appointment dates per patient
//!
//! # Migrations
//!
//! Migrations are stored in `crates/registry/migrations/` and run via:
//! ```bash
//! cargo run -p carelink-cli -- migrate
//! ```

pub mod addresses;
pub mod appointments;
pub mod links;
pub mod persons;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::RegistryError;

pub use addresses::AddressRepository;
pub use appointments::AppointmentRepository;
pub use links::LinkRepository;
pub use persons::PersonRepository;

/// Embedded migrations for the registry schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Foreign-key enforcement is switched on for every connection; the
/// referential-integrity failures the stores report depend on it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Map a driver error from a write into the registry taxonomy.
///
/// Foreign-key violations become [`RegistryError::Integrity`] (the delete or
/// insert collided with a live reference) and unique violations become
/// [`RegistryError::AlreadyExists`]; anything else stays a storage error.
pub(crate) fn constraint_error(
    err: sqlx::Error,
    integrity: &str,
    duplicate: &str,
) -> RegistryError {
    let kind = match &err {
        sqlx::Error::Database(db) => Some(db.kind()),
        _ => None,
    };

    match kind {
        Some(sqlx::error::ErrorKind::ForeignKeyViolation) => {
            RegistryError::Integrity(integrity.to_owned())
        }
        Some(sqlx::error::ErrorKind::UniqueViolation) => {
            RegistryError::AlreadyExists(duplicate.to_owned())
        }
        _ => RegistryError::Storage(err),
    }
}
