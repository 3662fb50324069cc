//! Connection facade over the posts collection.
//!
//! Wraps a [`DocumentStore`] with the post-specific operations the tools need.
//! Every failure is logged with context and then returned unchanged; there is
//! no retry and no fallback.

use crate::config::DatabaseConfig;
use crate::data_api::DataApiStore;
use crate::error::ConnectionError;
use serde_json::{Map, Value};
use shared::aggregation::aggregate_engagement;
use shared::models::{Engagement, MetricSummary, Post, PostType, COLLECTION_NAME, POST_TYPE_FIELD};
use shared::storage::{DocumentStore, FieldFilter, UpdateResult};

/// Handle to the `social_media_posts` collection.
///
/// # Example
///
/// ```
/// # async fn example() -> Result<(), db::ConnectionError> {
/// use db::DatabaseConnection;
/// use shared::models::{Post, PostType};
/// use shared::storage::InMemoryDocumentStore;
///
/// let conn = DatabaseConnection::with_store(InMemoryDocumentStore::new());
/// conn.create_collection().await?;
/// conn.insert_post(&Post::new(PostType::Reel, "Watch this tech tips hack!")).await?;
///
/// let metrics = conn.get_engagement_metrics(None).await?;
/// assert_eq!(metrics[0].total_posts, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConnection<S = DataApiStore> {
    store: S,
    collection: String,
}

impl DatabaseConnection<DataApiStore> {
    /// Validates `config` and opens a Data API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, ConnectionError> {
        let store = validator::Validate::validate(config)
            .map_err(ConnectionError::from)
            .and_then(|()| DataApiStore::new(config))
            .inspect_err(|e| tracing::error!(error = %e, "Error connecting to Data API"))?;

        tracing::info!(
            endpoint = %config.api_endpoint,
            keyspace = %config.keyspace,
            "Successfully connected to Data API"
        );
        Ok(Self::with_store(store))
    }
}

impl<S: DocumentStore> DatabaseConnection<S> {
    /// Wraps an existing store.
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            collection: COLLECTION_NAME.to_string(),
        }
    }

    /// Name of the collection this connection works on.
    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates the collection unless it already exists.
    ///
    /// Returns `true` if the collection was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if listing or creating collections fails.
    pub async fn create_collection(&self) -> Result<bool, ConnectionError> {
        let existing = self
            .store
            .list_collections()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error creating collection"))?;

        if existing.iter().any(|name| name == &self.collection) {
            tracing::debug!(collection = %self.collection, "Collection already exists");
            return Ok(false);
        }

        self.store
            .create_collection(&self.collection)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error creating collection"))?;

        tracing::info!(collection = %self.collection, "Collection created successfully");
        Ok(true)
    }

    /// Inserts a post and returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the post cannot be serialized or the insert fails.
    pub async fn insert_post(&self, post: &Post) -> Result<String, ConnectionError> {
        self.insert_document(post.to_document()?).await
    }

    /// Inserts a raw document and returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn insert_document(&self, document: Value) -> Result<String, ConnectionError> {
        let id = self
            .store
            .insert_one(&self.collection, document)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error inserting post"))?;

        tracing::info!(%id, "Successfully inserted post");
        Ok(id)
    }

    /// Sets the engagement counters of the post with identifier `id`.
    ///
    /// A post that no longer exists is logged and reported through a zero
    /// `matched_count`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_post_engagement(
        &self,
        id: &str,
        engagement: &Engagement,
    ) -> Result<UpdateResult, ConnectionError> {
        let mut fields = Map::new();
        fields.insert("likes".to_string(), Value::from(engagement.likes));
        fields.insert("shares".to_string(), Value::from(engagement.shares));
        fields.insert("comments".to_string(), Value::from(engagement.comments));

        let result = self
            .store
            .update_one(&self.collection, id, fields)
            .await
            .inspect_err(|e| tracing::error!(error = %e, %id, "Error updating post engagement"))?;

        if result.matched_count == 0 {
            tracing::warn!(%id, "No post matched engagement update");
        }
        Ok(result)
    }

    /// Returns every document, or those where `filter` holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_documents(
        &self,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Value>, ConnectionError> {
        let documents = self
            .store
            .find(&self.collection, filter)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error querying posts"))?;

        tracing::debug!(count = documents.len(), "Fetched documents");
        Ok(documents)
    }

    /// Returns every post document, or only those of `post_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_posts(
        &self,
        post_type: Option<PostType>,
    ) -> Result<Vec<Value>, ConnectionError> {
        let filter = post_type.map(|t| FieldFilter::equals(POST_TYPE_FIELD, t.as_str()));
        self.find_documents(filter.as_ref()).await
    }

    /// Computes per-category engagement averages over the stored posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a document cannot be aggregated.
    pub async fn get_engagement_metrics(
        &self,
        post_type: Option<PostType>,
    ) -> Result<Vec<MetricSummary>, ConnectionError> {
        let documents = self
            .find_posts(post_type)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error getting metrics"))?;

        aggregate_engagement(&documents)
            .inspect_err(|e| tracing::error!(error = %e, "Error getting metrics"))
            .map_err(ConnectionError::from)
    }
}
