//! Person repository, parameterized over the patient/caregiver role.
//!
//! Patients and caregivers share one record shape in two same-shaped tables;
//! the role value selects the table. The multi-statement operations (create
//! with address, update person + address, delete person then address) each
//! run inside a single transaction so a failure partway leaves nothing
//! applied.

use carelink_core::{AddressId, Email, NationalId, PersonRole, PostalCode};
use sqlx::SqlitePool;

use super::addresses::AddressRepository;
use super::constraint_error;
use crate::error::{RegistryError, Result};
use crate::models::{Address, AddressPatch, NewAddress, NewPerson, Person, PersonPatch};

/// Columns selected for a person joined with its address.
const JOINED_COLUMNS: &str = "p.national_id, p.name, p.age, p.email, p.phone, p.address_id, \
     a.street, a.number, a.complement, a.district, a.city, a.region, a.postal_code";

/// Internal row type for person+address JOIN queries.
#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    national_id: String,
    name: String,
    age: i64,
    email: String,
    phone: String,
    address_id: i64,
    street: String,
    number: String,
    complement: Option<String>,
    district: String,
    city: String,
    region: String,
    postal_code: Option<String>,
}

impl TryFrom<PersonRow> for Person {
    type Error = RegistryError;

    fn try_from(row: PersonRow) -> Result<Self> {
        let national_id = NationalId::parse(&row.national_id)
            .map_err(|e| RegistryError::Corrupt(format!("invalid national id in database: {e}")))?;

        let email = Email::parse(&row.email)
            .map_err(|e| RegistryError::Corrupt(format!("invalid email in database: {e}")))?;

        let age = u32::try_from(row.age)
            .map_err(|_| RegistryError::Corrupt(format!("negative age in database: {}", row.age)))?;

        let postal_code = row
            .postal_code
            .as_deref()
            .map(PostalCode::parse)
            .transpose()
            .map_err(|e| RegistryError::Corrupt(format!("invalid postal code in database: {e}")))?;

        Ok(Self {
            national_id,
            name: row.name,
            age,
            email,
            phone: row.phone,
            address: Address {
                id: AddressId::new(row.address_id),
                postal_code,
                street: row.street,
                number: row.number,
                complement: row.complement,
                district: row.district,
                city: row.city,
                region: row.region,
            },
        })
    }
}

/// Repository for patient or caregiver rows.
pub struct PersonRepository<'a> {
    pool: &'a SqlitePool,
    role: PersonRole,
}

impl<'a> PersonRepository<'a> {
    /// Create a repository targeting the table for `role`.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, role: PersonRole) -> Self {
        Self { pool, role }
    }

    const fn table(&self) -> &'static str {
        match self.role {
            PersonRole::Patient => "patients",
            PersonRole::Caregiver => "caregivers",
        }
    }

    fn joined_select(&self) -> String {
        format!(
            "SELECT {JOINED_COLUMNS} FROM {} p JOIN addresses a ON p.address_id = a.id",
            self.table()
        )
    }

    /// Insert the address and the person referencing it, atomically.
    ///
    /// The address row is written first; if the person insert then fails
    /// (duplicate national id, storage failure) the whole transaction rolls
    /// back and no orphan address remains.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] for a duplicate national id
    /// and [`RegistryError::Storage`] for write failures.
    pub async fn create_with_address(
        &self,
        person: &NewPerson,
        address: &NewAddress,
    ) -> Result<AddressId> {
        let mut tx = self.pool.begin().await?;

        let address_id = AddressRepository::insert(&mut *tx, address).await?;

        let sql = format!(
            "INSERT INTO {} (national_id, name, age, email, phone, address_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
            self.table()
        );
        let result = sqlx::query(&sql)
            .bind(person.national_id.as_str())
            .bind(&person.name)
            .bind(i64::from(person.age))
            .bind(person.email.as_str())
            .bind(&person.phone)
            .bind(address_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    "person references a missing address",
                    &format!("{} {}", self.role.label(), person.national_id),
                )
            })?;

        if result.rows_affected() != 1 {
            return Err(RegistryError::Corrupt(format!(
                "person insert affected {} rows",
                result.rows_affected()
            )));
        }

        tx.commit().await?;
        Ok(address_id)
    }

    /// Look up a single person by natural key, joined with their address.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails and
    /// [`RegistryError::Corrupt`] if stored data fails domain validation.
    pub async fn find_by_natural_id(&self, id: &NationalId) -> Result<Option<Person>> {
        let sql = format!("{} WHERE p.national_id = ?", self.joined_select());
        let row = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List every person of this role, ordered by name ascending.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Person>> {
        let sql = format!("{} ORDER BY p.name ASC", self.joined_select());
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List persons aged `min_age` or more, oldest first, then by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn filter_by_min_age(&self, min_age: u32) -> Result<Vec<Person>> {
        let sql = format!(
            "{} WHERE p.age >= ? ORDER BY p.age DESC, p.name ASC",
            self.joined_select()
        );
        let rows = sqlx::query_as::<_, PersonRow>(&sql)
            .bind(i64::from(min_age))
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Whether a person with this natural key exists.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the query fails.
    pub async fn exists(&self, id: &NationalId) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE national_id = ?)",
            self.table()
        );
        let found: i64 = sqlx::query_scalar(&sql)
            .bind(id.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(found != 0)
    }

    /// Apply partial updates to the person row and its address row.
    ///
    /// Both UPDATEs run in one transaction; `None` fields keep their stored
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no person has this natural key
    /// and [`RegistryError::Storage`] for write failures.
    pub async fn update(
        &self,
        id: &NationalId,
        person: &PersonPatch,
        address: &AddressPatch,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT address_id FROM {} WHERE national_id = ?",
            self.table()
        );
        let address_id: Option<i64> = sqlx::query_scalar(&sql)
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(address_id) = address_id else {
            return Err(RegistryError::NotFound(format!(
                "{} {id}",
                self.role.label()
            )));
        };

        let sql = format!(
            "UPDATE {} SET name = COALESCE(?1, name), age = COALESCE(?2, age), \
             email = COALESCE(?3, email), phone = COALESCE(?4, phone) \
             WHERE national_id = ?5",
            self.table()
        );
        sqlx::query(&sql)
            .bind(person.name.as_deref())
            .bind(person.age.map(i64::from))
            .bind(person.email.as_ref().map(Email::as_str))
            .bind(person.phone.as_deref())
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        AddressRepository::apply_patch(&mut *tx, AddressId::new(address_id), address).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete the person row, then its now-unreferenced address row.
    ///
    /// Both deletes run in one transaction. A foreign-key rejection (a link
    /// or appointment still references the person) rolls the whole operation
    /// back: person, address, and dependents all stay untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no person has this natural key
    /// and [`RegistryError::Integrity`] while dependent records exist.
    pub async fn delete(&self, id: &NationalId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT address_id FROM {} WHERE national_id = ?",
            self.table()
        );
        let address_id: Option<i64> = sqlx::query_scalar(&sql)
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(address_id) = address_id else {
            return Err(RegistryError::NotFound(format!(
                "{} {id}",
                self.role.label()
            )));
        };

        let sql = format!("DELETE FROM {} WHERE national_id = ?", self.table());
        let result = sqlx::query(&sql)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    &format!(
                        "{} {id} still has links or appointments",
                        self.role.label()
                    ),
                    id.as_str(),
                )
            })?;

        if result.rows_affected() != 1 {
            return Err(RegistryError::NotFound(format!(
                "{} {id}",
                self.role.label()
            )));
        }

        sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(address_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                constraint_error(e, "address is still referenced by a person", "address")
            })?;

        tx.commit().await?;
        Ok(())
    }
}
