//! HTTP handlers over the document store.

pub mod bids;
pub mod products;
pub mod session;
pub mod users;

use serde::{Deserialize, Serialize};

/// Optional owner filter carried in the query string of list endpoints.
#[derive(Debug, Deserialize)]
pub struct OwnerFilter {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateOutcome {
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}
