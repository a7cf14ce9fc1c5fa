//! Session credential issuance.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Open endpoint: signs whatever claims the caller supplies into a one-hour
/// credential. Intentionally a low-trust convenience token, not a security
/// boundary.
pub async fn issue_credential(
    State(state): State<AppState>,
    Json(claims): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.sessions.issue(claims)?;
    Ok(Json(TokenResponse { token }))
}
