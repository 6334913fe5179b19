//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! carelink migrate
//! ```
//!
//! # Environment Variables
//!
//! - `REGISTRY_DATABASE_URL` - `SQLite` connection string

use carelink_registry::config::RegistryConfig;
use carelink_registry::{MIGRATOR, RegistryError, create_pool};

use super::CliError;

/// Create the database if needed and run the registry migrations.
pub async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let config = RegistryConfig::from_env()?;

    tracing::info!("Connecting to registry database...");
    let pool = create_pool(&config.database_url)
        .await
        .map_err(RegistryError::from)?;

    tracing::info!("Running registry migrations...");
    MIGRATOR.run(&pool).await.map_err(RegistryError::from)?;

    println!("Registry migrations complete.");
    Ok(())
}
