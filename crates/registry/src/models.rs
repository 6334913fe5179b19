//! Registry records and the input/patch shapes the stores accept.

use carelink_core::{AddressId, Email, NationalId, PostalCode};
use serde::Serialize;

/// A structured address row.
///
/// Owned by exactly one person at a time; created before the person that
/// references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub postal_code: Option<PostalCode>,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub region: String,
}

impl Address {
    /// One-line display form, e.g.
    /// `Av. Paulista, 100 (ap 12) - Bela Vista (São Paulo/SP) CEP: 01310-930`.
    #[must_use]
    pub fn display_line(&self) -> String {
        let complement = self
            .complement
            .as_deref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();

        let mut line = format!(
            "{}, {}{} - {} ({}/{})",
            self.street, self.number, complement, self.district, self.city, self.region
        );

        if let Some(code) = &self.postal_code {
            line.push_str(&format!(" CEP: {code}"));
        }

        line
    }
}

/// Fields for a new address row (no id yet).
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub postal_code: Option<PostalCode>,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub region: String,
}

/// Partial address update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
}

impl AddressPatch {
    /// True when no field is set (the update would be a no-op).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.street.is_none() && self.number.is_none() && self.complement.is_none()
    }
}

/// A patient or caregiver record joined with its address.
#[derive(Debug, Clone)]
pub struct Person {
    pub national_id: NationalId,
    pub name: String,
    pub age: u32,
    pub email: Email,
    pub phone: String,
    pub address: Address,
}

impl Person {
    /// Formatted address string for display; raw fields stay available on
    /// [`Person::address`] for re-editing individual components.
    #[must_use]
    pub fn address_line(&self) -> String {
        self.address.display_line()
    }
}

/// Fields for a new person row (address supplied separately).
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub national_id: NationalId,
    pub name: String,
    pub age: u32,
    pub email: Email,
    pub phone: String,
}

/// Partial person update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

/// Where the address for a registration comes from.
#[derive(Debug, Clone)]
pub enum AddressSource {
    /// Resolve street/district/city/region from the postal-code service;
    /// number and complement are supplied by the operator.
    PostalCode {
        code: PostalCode,
        number: String,
        complement: Option<String>,
    },
    /// Full manual entry (used when resolution fails or there is no code).
    Manual(NewAddress),
}

/// Outcome of a link-creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new link row was written.
    Created,
    /// The pair was already linked; nothing was written.
    AlreadyLinked,
}

/// One flattened patient record in the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct PatientExport {
    pub name: String,
    pub national_id: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    pub region: String,
    pub postal_code: Option<String>,
}

impl From<&Person> for PatientExport {
    fn from(person: &Person) -> Self {
        let address = &person.address;
        Self {
            name: person.name.clone(),
            national_id: person.national_id.as_str().to_owned(),
            age: person.age,
            email: person.email.as_str().to_owned(),
            phone: person.phone.clone(),
            street: address.street.clone(),
            number: address.number.clone(),
            complement: address.complement.clone(),
            district: address.district.clone(),
            city: address.city.clone(),
            region: address.region.clone(),
            postal_code: address.postal_code.as_ref().map(|c| c.as_str().to_owned()),
        }
    }
}
