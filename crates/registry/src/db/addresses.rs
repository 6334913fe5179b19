//! Address repository.
//!
//! Addresses are created before the person that references them and removed
//! only after that person row is gone. The executor-generic helpers let the
//! person repository run the same statements inside its transactions.

use carelink_core::{AddressId, PostalCode};
use sqlx::SqlitePool;

use super::constraint_error;
use crate::error::{RegistryError, Result};
use crate::models::{AddressPatch, NewAddress};

/// Repository for address rows.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new address row and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the write fails; no partial
    /// success is possible for a single insert.
    pub async fn create(&self, address: &NewAddress) -> Result<AddressId> {
        Self::insert(self.pool, address).await
    }

    /// Update only the supplied street/number/complement fields.
    ///
    /// Fields left as `None` keep their stored value. An all-`None` patch is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the write fails.
    pub async fn update(&self, id: AddressId, patch: &AddressPatch) -> Result<()> {
        Self::apply_patch(self.pool, id, patch).await
    }

    /// Remove an address row.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Integrity`] while a person still references
    /// the row, and [`RegistryError::NotFound`] if it does not exist.
    pub async fn delete(&self, id: AddressId) -> Result<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await
            .map_err(|e| {
                constraint_error(
                    e,
                    "address is still referenced by a person",
                    "address",
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::NotFound(format!("address {id}")));
        }

        Ok(())
    }

    pub(crate) async fn insert<'e, E>(executor: E, address: &NewAddress) -> Result<AddressId>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO addresses (postal_code, street, number, complement, district, city, region)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(address.postal_code.as_ref().map(PostalCode::as_str))
        .bind(&address.street)
        .bind(&address.number)
        .bind(address.complement.as_deref())
        .bind(&address.district)
        .bind(&address.city)
        .bind(&address.region)
        .fetch_one(executor)
        .await?;

        Ok(AddressId::new(id))
    }

    pub(crate) async fn apply_patch<'e, E>(
        executor: E,
        id: AddressId,
        patch: &AddressPatch,
    ) -> Result<()>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        if patch.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r"
            UPDATE addresses
            SET street = COALESCE(?1, street),
                number = COALESCE(?2, number),
                complement = COALESCE(?3, complement)
            WHERE id = ?4
            ",
        )
        .bind(patch.street.as_deref())
        .bind(patch.number.as_deref())
        .bind(patch.complement.as_deref())
        .bind(id.as_i64())
        .execute(executor)
        .await?;

        Ok(())
    }
}
