//! Postal-code lookup endpoint.

use axum::Json;
use axum::extract::{Path, State};
use carelink_core::PostalCode;

use crate::error::RegistryError;
use crate::services::resolver::ResolvedAddress;
use crate::state::AppState;

/// `GET /api/postal-code/{code}` - resolve a code into a structured address.
///
/// Returns 400 for a malformed code, 404 when the service does not know it,
/// and 502 for network or payload failures upstream.
pub async fn lookup(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ResolvedAddress>, RegistryError> {
    let code =
        PostalCode::parse(&code).map_err(|e| RegistryError::Validation(e.to_string()))?;

    let resolved = state.resolver().resolve(&code).await?;
    Ok(Json(resolved))
}
