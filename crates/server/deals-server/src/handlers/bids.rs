//! Bid endpoints.
//!
//! Listing is gated and owner-checked; placing and deleting bids are open,
//! mirroring the system this replaces (see DESIGN.md).

use axum::Extension;
use axum::Json;
use axum::extract::{Path, Query, State};
use deals_auth_core::VerifiedIdentity;

use super::{DeleteOutcome, OwnerFilter};
use crate::error::ApiError;
use crate::policy::OwnershipPolicy;
use crate::state::AppState;
use crate::store::{BIDS, Document, Filter, FindOptions, Order, filter_on};

/// Gated. A `buyer_email` owner filter must name the caller's own verified
/// identity; an unscoped request lists every bid.
pub async fn list_bids(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Query(owner): Query<OwnerFilter>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let filter = match owner.email {
        Some(email) => {
            OwnershipPolicy::authorize(&identity, Some(&email))?;
            filter_on("buyer_email", email)
        }
        None => Filter::new(),
    };

    let bids = state.store.find(BIDS, filter, FindOptions::default()).await?;
    Ok(Json(bids))
}

/// Gated. Bids for one product, highest offer first.
pub async fn product_bids(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let bids = state
        .store
        .find(
            BIDS,
            filter_on("product", product_id),
            FindOptions::sorted_by("bid_price", Order::Descending),
        )
        .await?;
    Ok(Json(bids))
}

pub async fn create_bid(
    State(state): State<AppState>,
    Json(bid): Json<Document>,
) -> Result<Json<Document>, ApiError> {
    let stored = state.store.insert_one(BIDS, bid).await?;
    Ok(Json(stored))
}

pub async fn delete_bid(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let deleted_count = state.store.delete_one(BIDS, filter_on("_id", id)).await?;
    Ok(Json(DeleteOutcome { deleted_count }))
}
