//! Care-link repository.
//!
//! A link associates one patient with one caregiver. At most one link exists
//! per ordered pair; repeated creation requests are no-ops reported as
//! "already linked".

use carelink_core::{NationalId, PersonRole};
use sqlx::SqlitePool;

use super::constraint_error;
use super::persons::PersonRepository;
use crate::error::{RegistryError, Result};
use crate::models::LinkOutcome;

/// Repository for patient/caregiver association rows.
pub struct LinkRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LinkRepository<'a> {
    /// Create a new link repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether this patient/caregiver pair is already linked.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn exists(&self, patient: &NationalId, caregiver: &NationalId) -> Result<bool> {
        let found: i64 = sqlx::query_scalar(
            r"
            SELECT EXISTS(
                SELECT 1 FROM care_links
                WHERE patient_national_id = ? AND caregiver_national_id = ?
            )
            ",
        )
        .bind(patient.as_str())
        .bind(caregiver.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(found != 0)
    }

    /// Link a patient to a caregiver.
    ///
    /// Fails fast when either natural key does not resolve to a person of
    /// the right role. An existing link is reported as
    /// [`LinkOutcome::AlreadyLinked`] without writing; so is a duplicate
    /// insert that slips past the pre-check.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] naming the missing person and
    /// [`RegistryError::Storage`] for write failures.
    pub async fn create(
        &self,
        patient: &NationalId,
        caregiver: &NationalId,
    ) -> Result<LinkOutcome> {
        let patients = PersonRepository::new(self.pool, PersonRole::Patient);
        if !patients.exists(patient).await? {
            return Err(RegistryError::NotFound(format!("patient {patient}")));
        }

        let caregivers = PersonRepository::new(self.pool, PersonRole::Caregiver);
        if !caregivers.exists(caregiver).await? {
            return Err(RegistryError::NotFound(format!("caregiver {caregiver}")));
        }

        if self.exists(patient, caregiver).await? {
            return Ok(LinkOutcome::AlreadyLinked);
        }

        let insert = sqlx::query(
            "INSERT INTO care_links (patient_national_id, caregiver_national_id) VALUES (?, ?)",
        )
        .bind(patient.as_str())
        .bind(caregiver.as_str())
        .execute(self.pool)
        .await;

        match insert {
            Ok(_) => Ok(LinkOutcome::Created),
            Err(e) => {
                match constraint_error(e, "link references a missing person", "link") {
                    // Lost the race against an identical insert; same outcome.
                    RegistryError::AlreadyExists(_) => Ok(LinkOutcome::AlreadyLinked),
                    other => Err(other),
                }
            }
        }
    }
}
