//! Appointment repository.

use carelink_core::{NationalId, PersonRole};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::constraint_error;
use super::persons::PersonRepository;
use crate::error::{RegistryError, Result};

/// Repository for appointment rows.
pub struct AppointmentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Schedule an appointment for a patient on a calendar date.
    ///
    /// Patient existence is validated first; several appointments per
    /// patient are allowed, including on the same date.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown patient and
    /// [`RegistryError::Storage`] for write failures.
    pub async fn create(&self, patient: &NationalId, date: NaiveDate) -> Result<()> {
        let patients = PersonRepository::new(self.pool, PersonRole::Patient);
        if !patients.exists(patient).await? {
            return Err(RegistryError::NotFound(format!("patient {patient}")));
        }

        sqlx::query("INSERT INTO appointments (patient_national_id, scheduled_on) VALUES (?, ?)")
            .bind(patient.as_str())
            .bind(date)
            .execute(self.pool)
            .await
            .map_err(|e| constraint_error(e, "appointment references a missing patient", "appointment"))?;

        Ok(())
    }

    /// List a patient's appointment dates in ascending chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown patient and
    /// [`RegistryError::Storage`] if the query fails.
    pub async fn list(&self, patient: &NationalId) -> Result<Vec<NaiveDate>> {
        let patients = PersonRepository::new(self.pool, PersonRole::Patient);
        if !patients.exists(patient).await? {
            return Err(RegistryError::NotFound(format!("patient {patient}")));
        }

        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r"
            SELECT scheduled_on FROM appointments
            WHERE patient_national_id = ?
            ORDER BY scheduled_on ASC
            ",
        )
        .bind(patient.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(dates)
    }
}
