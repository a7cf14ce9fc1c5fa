//! Request gate: identity verification ahead of gated handlers.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Verifies the bearer assertion and attaches the resulting identity to the
/// request.
///
/// Gated handlers read the identity from request extensions; an unverifiable
/// request never reaches them. The rejection body is the generic
/// unauthenticated response regardless of which step failed.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = state.verifier.verify_header(header).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
