//! Registry configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `REGISTRY_DATABASE_URL` - `SQLite` connection string (e.g. `sqlite:carelink.db`)
//!
//! ## Optional
//! - `REGISTRY_HOST` - Lookup-server bind address (default: 127.0.0.1)
//! - `REGISTRY_PORT` - Lookup-server port (default: 3000)
//! - `VIACEP_BASE_URL` - Postal-lookup base URL (default: `https://viacep.com.br/ws`)
//! - `VIACEP_TIMEOUT_SECS` - Lookup round-trip bound in seconds (default: 5)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

const DEFAULT_RESOLVER_BASE_URL: &str = "https://viacep.com.br/ws";
const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 5;
const DEFAULT_PORT: u16 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Registry application configuration.
///
/// Constructed once from the environment and passed explicitly to store and
/// service constructors; nothing reads ambient global state after startup.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// `SQLite` database connection URL.
    pub database_url: String,
    /// IP address the lookup server binds to.
    pub host: IpAddr,
    /// Port the lookup server listens on.
    pub port: u16,
    /// Postal-code resolver settings.
    pub resolver: ResolverConfig,
}

/// Postal-code resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Base URL of the ViaCEP-compatible lookup service.
    pub base_url: String,
    /// Bound on the lookup round trip.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RESOLVER_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_RESOLVER_TIMEOUT_SECS),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("REGISTRY_DATABASE_URL")?;

        let host = match optional("REGISTRY_HOST") {
            Some(raw) => parse_var("REGISTRY_HOST", &raw)?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match optional("REGISTRY_PORT") {
            Some(raw) => parse_var("REGISTRY_PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let mut resolver = ResolverConfig::default();
        if let Some(base_url) = optional("VIACEP_BASE_URL") {
            resolver.base_url = base_url.trim_end_matches('/').to_owned();
        }
        if let Some(raw) = optional("VIACEP_TIMEOUT_SECS") {
            let secs: u64 = parse_var("VIACEP_TIMEOUT_SECS", &raw)?;
            resolver.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            database_url,
            host,
            port,
            resolver,
        })
    }

    /// Socket address for the lookup server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
}
