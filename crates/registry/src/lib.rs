//! CareLink Registry - store and orchestration layer.
//!
//! Records patients, caregivers, structured addresses, care links, and
//! appointment dates in `SQLite`, with address auto-fill from a public
//! postal-code lookup service.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Connection pool, migrations, and the per-table repositories
//! - [`services`] - The resolver client and [`services::RegistryService`]
//! - [`routes`] / [`state`] - The thin postal-lookup HTTP boundary
//! - [`models`] - Records, inputs, and patch shapes
//! - [`error`] - The registry failure taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::{ConfigError, RegistryConfig, ResolverConfig};
pub use db::{MIGRATOR, create_pool};
pub use error::RegistryError;
pub use services::{PostalResolver, RegistryService, ResolveError};
