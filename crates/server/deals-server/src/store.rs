//! Abstract keyed-collection storage collaborator.
//!
//! The real document store is external to this system; handlers only rely on
//! the operations below. Filters are equality maps over top-level fields.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const PRODUCTS: &str = "products";
pub const BIDS: &str = "bids";
pub const USERS: &str = "users";

pub type Document = Map<String, Value>;
pub type Filter = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub sort: Option<(String, Order)>,
    pub limit: Option<usize>,
}

impl FindOptions {
    pub fn sorted_by(field: impl Into<String>, order: Order) -> Self {
        Self {
            sort: Some((field.into(), order)),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, collection: &str, filter: Filter) -> StoreResult<Option<Document>>;

    /// Inserts a document, assigning an `_id` when absent, and returns the
    /// stored form.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Document>;

    /// Sets the given fields on the first matching document. Returns the
    /// number of documents modified.
    async fn update_one(&self, collection: &str, filter: Filter, set: Document)
    -> StoreResult<u64>;

    /// Deletes the first matching document. Returns the number deleted.
    async fn delete_one(&self, collection: &str, filter: Filter) -> StoreResult<u64>;
}

fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// In-memory document store used in tests and local development.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(
        &self,
        collection: &str,
        filter: Filter,
        options: FindOptions,
    ) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut results: Vec<Document> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, order)) = &options.sort {
            results.sort_by(|a, b| {
                let ordering = compare_field(a, b, field);
                match order {
                    Order::Ascending => ordering,
                    Order::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = options.limit {
            results.truncate(limit);
        }
        Ok(results)
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches(document, &filter))
                .cloned()
        }))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> StoreResult<Document> {
        if !document.contains_key("_id") {
            document.insert("_id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
    ) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter_mut().find(|document| matches(document, &filter)) {
            Some(document) => {
                for (field, value) in set {
                    document.insert(field, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: Filter) -> StoreResult<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter().position(|document| matches(document, &filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Builds an equality filter on a single field.
pub fn filter_on(field: &str, value: impl Into<Value>) -> Filter {
    let mut filter = Filter::new();
    filter.insert(field.to_string(), value.into());
    filter
}
