//! Registry use cases, composed from the repositories and the resolver.

use std::path::Path;

use carelink_core::{NationalId, PersonRole};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::{AppointmentRepository, LinkRepository, PersonRepository};
use crate::error::{RegistryError, Result};
use crate::models::{
    AddressPatch, AddressSource, LinkOutcome, NewAddress, NewPerson, PatientExport, Person,
    PersonPatch,
};
use crate::services::resolver::PostalResolver;

/// Orchestrates the registry use cases over the stores and the resolver.
pub struct RegistryService {
    pool: SqlitePool,
    resolver: PostalResolver,
}

impl RegistryService {
    /// Create a new registry service.
    #[must_use]
    pub const fn new(pool: SqlitePool, resolver: PostalResolver) -> Self {
        Self { pool, resolver }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn persons(&self, role: PersonRole) -> PersonRepository<'_> {
        PersonRepository::new(&self.pool, role)
    }

    /// Register a person with either a resolved or manually entered address.
    ///
    /// With [`AddressSource::PostalCode`] the street/district/city/region are
    /// auto-filled from the lookup service; a resolution failure propagates
    /// so the input boundary can fall back to manual entry. Address and
    /// person are written in one transaction: if either insert fails no
    /// orphan row remains.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Validation`] for blank required fields,
    /// [`RegistryError::Resolution`] when the code cannot be resolved,
    /// [`RegistryError::AlreadyExists`] for a duplicate national id.
    pub async fn register_person(
        &self,
        role: PersonRole,
        person: NewPerson,
        source: AddressSource,
    ) -> Result<Person> {
        validate_person(&person)?;

        let address = match source {
            AddressSource::Manual(address) => {
                validate_address(&address)?;
                address
            }
            AddressSource::PostalCode {
                code,
                number,
                complement,
            } => {
                require_field("number", &number)?;
                let resolved = self.resolver.resolve(&code).await?;
                tracing::info!(%code, street = %resolved.street, "address auto-filled from postal lookup");
                NewAddress {
                    postal_code: Some(resolved.postal_code),
                    street: resolved.street,
                    number,
                    complement,
                    district: resolved.district,
                    city: resolved.city,
                    region: resolved.region,
                }
            }
        };

        let repo = self.persons(role);
        repo.create_with_address(&person, &address).await?;

        repo.find_by_natural_id(&person.national_id)
            .await?
            .ok_or_else(|| {
                RegistryError::Corrupt(format!(
                    "{} {} vanished after insert",
                    role.label(),
                    person.national_id
                ))
            })
    }

    /// Look up one person by natural key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no row matches.
    pub async fn find_person(&self, role: PersonRole, id: &NationalId) -> Result<Person> {
        self.persons(role)
            .find_by_natural_id(id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(format!("{} {id}", role.label())))
    }

    /// List every person of a role, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn list_persons(&self, role: PersonRole) -> Result<Vec<Person>> {
        self.persons(role).list_all().await
    }

    /// Patients aged `min_age` or more, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn patients_with_min_age(&self, min_age: u32) -> Result<Vec<Person>> {
        self.persons(PersonRole::Patient)
            .filter_by_min_age(min_age)
            .await
    }

    /// Apply a partial update to a person and their address.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Validation`] for blank supplied values,
    /// [`RegistryError::NotFound`] for an unknown natural key.
    pub async fn update_person(
        &self,
        role: PersonRole,
        id: &NationalId,
        person: &PersonPatch,
        address: &AddressPatch,
    ) -> Result<()> {
        validate_person_patch(person)?;
        validate_address_patch(address)?;
        self.persons(role).update(id, person, address).await
    }

    /// Delete a person and their now-unreferenced address.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Integrity`] while links or appointments still
    /// reference the person (nothing is changed in that case),
    /// [`RegistryError::NotFound`] for an unknown natural key.
    pub async fn delete_person(&self, role: PersonRole, id: &NationalId) -> Result<()> {
        self.persons(role).delete(id).await
    }

    /// Link a patient to a caregiver; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] naming whichever person is
    /// missing.
    pub async fn link_caregiver(
        &self,
        patient: &NationalId,
        caregiver: &NationalId,
    ) -> Result<LinkOutcome> {
        LinkRepository::new(&self.pool).create(patient, caregiver).await
    }

    /// Schedule an appointment for a patient.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown patient.
    pub async fn schedule_appointment(&self, patient: &NationalId, date: NaiveDate) -> Result<()> {
        AppointmentRepository::new(&self.pool).create(patient, date).await
    }

    /// A patient's appointment dates, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown patient.
    pub async fn appointments_for(&self, patient: &NationalId) -> Result<Vec<NaiveDate>> {
        AppointmentRepository::new(&self.pool).list(patient).await
    }

    /// Serialize all patients (joined with addresses) to a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] or [`RegistryError::Serialize`].
    pub async fn export_patients(&self) -> Result<String> {
        let patients = self.persons(PersonRole::Patient).list_all().await?;
        let records: Vec<PatientExport> = patients.iter().map(PatientExport::from).collect();
        to_pretty_json(&records)
    }

    /// Export all patients to a file; returns the record count.
    ///
    /// A write failure surfaces as [`RegistryError::ExportIo`] for the
    /// caller to report; it never aborts the process.
    ///
    /// # Errors
    ///
    /// See [`RegistryService::export_patients`], plus the write failure.
    pub async fn export_patients_to(&self, path: &Path) -> Result<usize> {
        let patients = self.persons(PersonRole::Patient).list_all().await?;
        let records: Vec<PatientExport> = patients.iter().map(PatientExport::from).collect();
        let document = to_pretty_json(&records)?;

        tokio::fs::write(path, document).await?;
        Ok(records.len())
    }
}

/// Serialize with 4-space indentation, keeping non-ASCII text unescaped.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| RegistryError::Corrupt(e.to_string()))
}

fn require_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn validate_person(person: &NewPerson) -> Result<()> {
    require_field("name", &person.name)?;
    require_field("phone", &person.phone)
}

fn validate_address(address: &NewAddress) -> Result<()> {
    require_field("street", &address.street)?;
    require_field("number", &address.number)?;
    require_field("district", &address.district)?;
    require_field("city", &address.city)?;
    require_field("region", &address.region)
}

fn validate_person_patch(patch: &PersonPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        require_field("name", name)?;
    }
    if let Some(phone) = &patch.phone {
        require_field("phone", phone)?;
    }
    Ok(())
}

fn validate_address_patch(patch: &AddressPatch) -> Result<()> {
    if let Some(street) = &patch.street {
        require_field("street", street)?;
    }
    if let Some(number) = &patch.number {
        require_field("number", number)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_export() -> PatientExport {
        PatientExport {
            name: "João da Silva".to_owned(),
            national_id: "11122233344".to_owned(),
            age: 72,
            email: "joao@example.com".to_owned(),
            phone: "11 99999-0000".to_owned(),
            street: "Av. Paulista".to_owned(),
            number: "100".to_owned(),
            complement: None,
            district: "Bela Vista".to_owned(),
            city: "São Paulo".to_owned(),
            region: "SP".to_owned(),
            postal_code: Some("01310930".to_owned()),
        }
    }

    #[test]
    fn export_uses_four_space_indentation() {
        let document = to_pretty_json(&vec![sample_export()]).expect("serializable");
        assert!(document.starts_with("[\n    {\n        \"name\""));
    }

    #[test]
    fn export_preserves_non_ascii_unescaped() {
        let document = to_pretty_json(&vec![sample_export()]).expect("serializable");
        assert!(document.contains("São Paulo"));
        assert!(document.contains("João da Silva"));
        assert!(!document.contains("\\u"));
    }

    #[test]
    fn blank_required_fields_are_validation_errors() {
        assert!(matches!(
            require_field("name", "   "),
            Err(RegistryError::Validation(_))
        ));
        assert!(require_field("name", "Ana").is_ok());
    }

    #[test]
    fn patches_may_not_blank_out_required_fields() {
        let patch = PersonPatch {
            name: Some(String::new()),
            ..PersonPatch::default()
        };
        assert!(validate_person_patch(&patch).is_err());
        assert!(validate_person_patch(&PersonPatch::default()).is_ok());
    }
}
