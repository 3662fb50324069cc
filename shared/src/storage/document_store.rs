//! Document store trait and implementations.
//!
//! Provides the `DocumentStore` trait for abstracting the external collection
//! service and an `InMemoryDocumentStore` implementation for development and
//! testing.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to acquire lock on the store.
    #[error("Failed to acquire lock on document store")]
    LockError,

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The service answered with one or more error messages.
    #[error("Data API error: {0}")]
    Api(String),

    /// The service answered with a body this client does not understand.
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// The document handed to the store is not a JSON object.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The target collection does not exist.
    #[error("Collection '{0}' does not exist")]
    CollectionNotFound(String),

    /// A document with the same identifier is already stored.
    #[error("Document with _id '{0}' already exists")]
    DuplicateId(String),
}

/// Equality filter on a single document field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Field name to compare.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

impl FieldFilter {
    /// Creates a `field == value` filter.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Renders the filter in the `{"field": value}` wire form.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.field.clone(), self.value.clone());
        Value::Object(map)
    }

    /// Returns true if `document` satisfies the filter.
    #[must_use]
    pub fn matches(&self, document: &Value) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

/// Result of an update operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Documents that matched the filter.
    pub matched_count: u64,
    /// Documents that were actually changed.
    pub modified_count: u64,
}

/// Trait for collection-oriented document stores.
///
/// Implementations must be thread-safe (Send + Sync). Operations never retry;
/// errors are returned exactly as the backend produced them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists the collection names in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    /// Creates a collection. Creating an existing collection is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    async fn create_collection(&self, name: &str) -> Result<(), StoreError>;

    /// Inserts one document and returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is missing, the identifier is
    /// taken, or the backend call fails.
    async fn insert_one(&self, collection: &str, document: Value) -> Result<String, StoreError>;

    /// Returns every document, or those matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is missing or the backend call fails.
    async fn find(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Value>, StoreError>;

    /// Sets `fields` on the document whose `_id` is `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is missing or the backend call fails.
    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<UpdateResult, StoreError>;
}

/// In-memory document store implementation.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<BTreeMap<String, Vec<Value>>>>,
}

impl InMemoryDocumentStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in `collection` (zero if absent).
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockError)?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockError)?;
        Ok(collections.keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockError)?;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let Value::Object(mut document) = document else {
            return Err(StoreError::InvalidDocument(
                "insertOne expects a JSON object".to_string(),
            ));
        };

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockError)?;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        let id = match document.get("_id") {
            Some(Value::String(id)) => id.clone(),
            Some(other) => other.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                document.insert("_id".to_string(), Value::String(id.clone()));
                id
            }
        };

        if docs.iter().any(|d| id_of(d).as_deref() == Some(id.as_str())) {
            return Err(StoreError::DuplicateId(id));
        }

        docs.push(Value::Object(document));
        Ok(id)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::LockError)?;
        let docs = collections
            .get(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        Ok(docs
            .iter()
            .filter(|d| filter.map_or(true, |f| f.matches(d)))
            .cloned()
            .collect())
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<UpdateResult, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::LockError)?;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::CollectionNotFound(collection.to_string()))?;

        let Some(Value::Object(target)) = docs
            .iter_mut()
            .find(|d| id_of(d).as_deref() == Some(id))
        else {
            return Ok(UpdateResult::default());
        };

        let mut modified = false;
        for (key, value) in fields {
            if target.get(&key) != Some(&value) {
                target.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }
}

fn id_of(document: &Value) -> Option<String> {
    match document.get("_id")? {
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}
