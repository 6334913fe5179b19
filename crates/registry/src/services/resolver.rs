//! Postal-code lookup client (ViaCEP-compatible).
//!
//! # API Reference
//!
//! - Base URL: `https://viacep.com.br/ws`
//! - Lookup: `GET /{code}/json/` with an 8-digit code
//! - A known code returns the address fields; an unknown one returns
//!   `{"erro": true}` with HTTP 200
//!
//! All failure kinds - not found, network/timeout, malformed payload - are
//! equivalent to callers: the address could not be resolved automatically
//! and manual entry is the fallback.

use carelink_core::PostalCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ResolverConfig;

/// Errors that can occur when resolving a postal code.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The lookup service does not know this code.
    #[error("postal code {0} not found")]
    NotFound(String),

    /// Connection, timeout, or protocol failure.
    #[error("lookup request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with something that is not a usable address.
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

/// A structured address returned by the lookup service.
///
/// Street/district/city/region come from the service; number and complement
/// are always operator-supplied.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAddress {
    pub postal_code: PostalCode,
    pub street: String,
    pub district: String,
    pub city: String,
    pub region: String,
}

/// Wire shape of a ViaCEP lookup response.
///
/// The service signals "unknown code" with an `erro` member whose type has
/// varied over the years (boolean or string), so any value counts.
#[derive(Debug, Deserialize)]
struct LookupPayload {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: Option<String>,
    #[serde(default)]
    bairro: Option<String>,
    #[serde(default)]
    localidade: Option<String>,
    #[serde(default)]
    uf: Option<String>,
}

/// Client for the postal-code lookup service.
pub struct PostalResolver {
    client: reqwest::Client,
    base_url: String,
}

impl PostalResolver {
    /// Create a new resolver client with the configured round-trip bound.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Network`] if the HTTP client fails to build.
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Resolve a postal code into a structured address.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] for unknown codes, network/timeout
    /// failures, and unusable payloads; callers treat all of them as "could
    /// not resolve automatically".
    pub async fn resolve(&self, code: &PostalCode) -> Result<ResolvedAddress, ResolveError> {
        let url = format!("{}/{}/json/", self.base_url, code.as_str());
        tracing::debug!(%code, "resolving postal code");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Malformed(format!(
                "lookup service returned {status}"
            )));
        }

        let payload: LookupPayload = response
            .json()
            .await
            .map_err(|e| ResolveError::Malformed(e.to_string()))?;

        decode_payload(code, payload)
    }
}

fn decode_payload(
    code: &PostalCode,
    payload: LookupPayload,
) -> Result<ResolvedAddress, ResolveError> {
    if payload.erro.is_some() {
        return Err(ResolveError::NotFound(code.to_string()));
    }

    let field = |name: &str, value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ResolveError::Malformed(format!("missing field {name}")))
    };

    Ok(ResolvedAddress {
        postal_code: code.clone(),
        street: field("logradouro", payload.logradouro)?,
        district: field("bairro", payload.bairro)?,
        city: field("localidade", payload.localidade)?,
        region: field("uf", payload.uf)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code() -> PostalCode {
        PostalCode::parse("01310930").expect("valid code")
    }

    fn payload(value: serde_json::Value) -> LookupPayload {
        serde_json::from_value(value).expect("valid payload shape")
    }

    #[test]
    fn decodes_a_complete_answer() {
        let payload = payload(json!({
            "cep": "01310-930",
            "logradouro": "Av. Paulista",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        }));

        let resolved = decode_payload(&code(), payload).expect("resolvable");
        assert_eq!(resolved.street, "Av. Paulista");
        assert_eq!(resolved.district, "Bela Vista");
        assert_eq!(resolved.city, "São Paulo");
        assert_eq!(resolved.region, "SP");
        assert_eq!(resolved.postal_code.as_str(), "01310930");
    }

    #[test]
    fn erro_member_means_not_found_whatever_its_type() {
        let boolean = payload(json!({ "erro": true }));
        assert!(matches!(
            decode_payload(&code(), boolean),
            Err(ResolveError::NotFound(_))
        ));

        let string = payload(json!({ "erro": "true" }));
        assert!(matches!(
            decode_payload(&code(), string),
            Err(ResolveError::NotFound(_))
        ));
    }

    #[test]
    fn missing_or_blank_fields_are_malformed() {
        let missing = payload(json!({ "logradouro": "Av. Paulista" }));
        assert!(matches!(
            decode_payload(&code(), missing),
            Err(ResolveError::Malformed(_))
        ));

        let blank = payload(json!({
            "logradouro": "",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        }));
        assert!(matches!(
            decode_payload(&code(), blank),
            Err(ResolveError::Malformed(_))
        ));
    }
}
