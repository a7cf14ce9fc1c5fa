//! Product endpoints.
//!
//! Listing and lookup are open; insertion sits behind the request gate.
//! Update and delete by id are deliberately open as well, mirroring the
//! system this replaces (see DESIGN.md).

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;

use super::{DeleteOutcome, OwnerFilter, UpdateOutcome};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Document, Filter, FindOptions, Order, PRODUCTS, filter_on};

pub async fn list_products(
    State(state): State<AppState>,
    Query(owner): Query<OwnerFilter>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = match owner.email {
        Some(email) => filter_on("email", email),
        None => Filter::new(),
    };
    let products = state
        .store
        .find(PRODUCTS, filter, FindOptions::default())
        .await?;
    Ok(Json(products))
}

pub async fn latest_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let products = state
        .store
        .find(
            PRODUCTS,
            Filter::new(),
            FindOptions::sorted_by("created_at", Order::Descending).limit(8),
        )
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let product = state
        .store
        .find_one(PRODUCTS, filter_on("_id", id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(product))
}

/// Gated. The query filter targets `seller_email` and is not checked against
/// the verified identity; only `/bids` carries that check.
pub async fn my_products(
    State(state): State<AppState>,
    Query(owner): Query<OwnerFilter>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = match owner.email {
        Some(email) => filter_on("seller_email", email),
        None => Filter::new(),
    };
    let products = state
        .store
        .find(PRODUCTS, filter, FindOptions::default())
        .await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Document>,
) -> Result<Json<Document>, ApiError> {
    let stored = state.store.insert_one(PRODUCTS, product).await?;
    Ok(Json(stored))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<Document>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let modified_count = state
        .store
        .update_one(PRODUCTS, filter_on("_id", id), changes)
        .await?;
    Ok(Json(UpdateOutcome { modified_count }))
}

pub async fn mark_product_sold(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let mut changes = Document::new();
    changes.insert("status".to_string(), json!("sold"));

    let modified_count = state
        .store
        .update_one(PRODUCTS, filter_on("_id", id), changes)
        .await?;
    Ok(Json(UpdateOutcome { modified_count }))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let deleted_count = state
        .store
        .delete_one(PRODUCTS, filter_on("_id", id))
        .await?;
    Ok(Json(DeleteOutcome { deleted_count }))
}
