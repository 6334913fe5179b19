//! CLI command implementations.

pub mod care;
pub mod export;
pub mod migrate;
pub mod person;

use carelink_registry::config::{ConfigError, RegistryConfig};
use carelink_registry::services::{PostalResolver, RegistryService};
use carelink_registry::{RegistryError, create_pool};
use thiserror::Error;

/// Errors a CLI command can produce.
#[derive(Debug, Error)]
pub enum CliError {
    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A command-line value failed to parse.
    #[error("{0}")]
    Input(String),

    /// The environment configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Shorthand for input-boundary validation failures.
    pub fn input(err: impl std::fmt::Display) -> Self {
        Self::Input(err.to_string())
    }
}

/// Load configuration and open the registry service.
///
/// Migrations are not run here; `carelink migrate` does that explicitly.
pub async fn open_service() -> Result<RegistryService, CliError> {
    dotenvy::dotenv().ok();

    let config = RegistryConfig::from_env()?;
    let pool = create_pool(&config.database_url)
        .await
        .map_err(RegistryError::from)?;
    let resolver = PostalResolver::new(&config.resolver).map_err(RegistryError::from)?;

    Ok(RegistryService::new(pool, resolver))
}
