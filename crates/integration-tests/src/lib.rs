//! Integration tests for Carelink.
//!
//! Every test runs against its own in-memory `SQLite` database with the
//! registry migrations applied, so the suite needs no external services.
//! The postal resolver is pointed at an unroutable address; tests that
//! exercise registration use manual address entry.
//!
//! Run with: `cargo test -p carelink-integration-tests`

use std::str::FromStr;
use std::time::Duration;

use carelink_core::{Email, NationalId, PostalCode};
use carelink_registry::config::ResolverConfig;
use carelink_registry::models::{NewAddress, NewPerson};
use carelink_registry::services::{PostalResolver, RegistryService};
use carelink_registry::MIGRATOR;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// A fresh in-memory database with the registry schema applied.
///
/// A single connection keeps the in-memory database alive for the whole
/// test; a larger pool would hand out separate empty databases.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory database");

    MIGRATOR.run(&pool).await.expect("migrations apply cleanly");
    pool
}

/// A registry service over a fresh in-memory database.
///
/// The resolver base URL points at a closed local port, so any test that
/// accidentally triggers a postal lookup fails fast instead of reaching
/// the network.
pub async fn service() -> RegistryService {
    let pool = memory_pool().await;
    let resolver = PostalResolver::new(&ResolverConfig {
        base_url: "http://127.0.0.1:9".to_owned(),
        timeout: Duration::from_millis(200),
    })
    .expect("client builds");

    RegistryService::new(pool, resolver)
}

/// A valid national id from any digit string.
pub fn national_id(raw: &str) -> NationalId {
    NationalId::parse(raw).expect("valid national id")
}

/// A new-person record with the given id, name, and age.
pub fn sample_person(id: &str, name: &str, age: u32) -> NewPerson {
    NewPerson {
        national_id: national_id(id),
        name: name.to_owned(),
        age,
        email: Email::parse(&format!("{id}@example.com")).expect("valid email"),
        phone: "11 99999-0000".to_owned(),
    }
}

/// A complete manually entered address.
pub fn sample_address() -> NewAddress {
    NewAddress {
        postal_code: Some(PostalCode::parse("01310930").expect("valid code")),
        street: "Av. Paulista".to_owned(),
        number: "100".to_owned(),
        complement: None,
        district: "Bela Vista".to_owned(),
        city: "São Paulo".to_owned(),
        region: "SP".to_owned(),
    }
}
