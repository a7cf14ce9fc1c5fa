//! User endpoints.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Filter, USERS};

/// Inserts a user document unless one with the same email already exists.
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<crate::store::Document>,
) -> Result<Json<Value>, ApiError> {
    let mut filter = Filter::new();
    filter.insert(
        "email".to_string(),
        user.get("email").cloned().unwrap_or(Value::Null),
    );

    if state.store.find_one(USERS, filter).await?.is_some() {
        return Ok(Json(json!({ "message": "User already exists." })));
    }

    let stored = state.store.insert_one(USERS, user).await?;
    Ok(Json(Value::Object(stored)))
}
