//! Error type for the connection facade.

use shared::aggregation::AggregationError;
use shared::storage::StoreError;
use thiserror::Error;

/// Errors surfaced by [`crate::DatabaseConnection`].
///
/// Backend failures are wrapped without reclassification.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The configuration failed validation.
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    /// The application token cannot be sent as a header.
    #[error("Application token is not a valid header value: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A document could not be serialized.
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document store rejected or failed the call.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The query result could not be aggregated.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
