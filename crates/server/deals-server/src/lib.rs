//! Smart deals backend: a bidding marketplace whose core is identity
//! verification and ownership authorization.
//!
//! Inbound requests to gated routes pass through the request gate, which
//! verifies the bearer assertion against the identity provider and attaches
//! the resulting [`deals_auth_core::VerifiedIdentity`] to the request. Owner-
//! scoped listings additionally run the ownership policy. Everything else is
//! pass-through CRUD over the document-store collaborator.

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod policy;
pub mod state;
pub mod store;

use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use tower_http::cors::CorsLayer;

pub use state::AppState;

async fn health() -> &'static str {
    "Smart deals server is running"
}

/// Builds the full application router over the given state.
pub fn app(state: AppState) -> Router {
    let gated = Router::new()
        .route("/my-products", get(handlers::products::my_products))
        .route("/products", post(handlers::products::create_product))
        .route("/bids", get(handlers::bids::list_bids))
        .route("/products/bids/{product_id}", get(handlers::bids::product_bids))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::require_identity,
        ));

    Router::new()
        .route("/", get(health))
        .route("/get-token", post(handlers::session::issue_credential))
        .route("/users", post(handlers::users::create_user))
        .route("/products", get(handlers::products::list_products))
        .route("/latest-products", get(handlers::products::latest_products))
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/products/make-sold/{id}",
            patch(handlers::products::mark_product_sold),
        )
        .route("/bids", post(handlers::bids::create_bid))
        .route("/bids/{id}", delete(handlers::bids::delete_bid))
        .merge(gated)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
