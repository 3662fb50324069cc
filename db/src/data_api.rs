//! HTTP client for the JSON Data API.
//!
//! Every command is a `POST` of a single-key JSON object such as
//! `{"insertOne": {"document": {...}}}` to either the keyspace URL or a
//! collection URL. The service reports failures either with a non-2xx status
//! or with an `errors` array in an otherwise successful response.

use crate::config::DatabaseConfig;
use crate::error::ConnectionError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use shared::storage::{DocumentStore, FieldFilter, StoreError, UpdateResult};

/// Header carrying the application token. Header names are case-insensitive.
pub const TOKEN_HEADER: &str = "token";

/// `DocumentStore` backed by the JSON Data API.
#[derive(Clone)]
pub struct DataApiStore {
    client: Client,
    keyspace_url: String,
}

impl DataApiStore {
    /// Builds a client for the keyspace described by `config`.
    ///
    /// No request is sent; an unreachable endpoint is only noticed on the
    /// first command.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: &DatabaseConfig) -> Result<Self, ConnectionError> {
        let mut token = HeaderValue::from_str(&config.token)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(TOKEN_HEADER, token);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            keyspace_url: config.keyspace_url(),
        })
    }

    /// URL for keyspace-level commands.
    #[must_use]
    pub fn keyspace_url(&self) -> &str {
        &self.keyspace_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.keyspace_url, collection)
    }

    /// Sends one command and returns the decoded response body.
    async fn command(&self, url: &str, body: &Value) -> Result<Value, StoreError> {
        let command = body
            .as_object()
            .and_then(|o| o.keys().next())
            .map_or("unknown", String::as_str);
        tracing::debug!(%url, command, "Sending Data API command");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);

        if !status.is_success() {
            return Err(StoreError::Api(format!("HTTP {status}: {text}")));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidResponse(format!("{e}: {text}")))?;
        check_errors(&value)?;
        Ok(value)
    }
}

impl std::fmt::Debug for DataApiStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataApiStore")
            .field("keyspace_url", &self.keyspace_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentStore for DataApiStore {
    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        let response = self
            .command(&self.keyspace_url, &json!({"findCollections": {}}))
            .await?;
        parse_collections(&response)
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        self.command(
            &self.keyspace_url,
            &json!({"createCollection": {"name": name}}),
        )
        .await?;
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        let response = self
            .command(
                &self.collection_url(collection),
                &json!({"insertOne": {"document": document}}),
            )
            .await?;
        parse_inserted_id(&response)
    }

    async fn find(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Value>, StoreError> {
        let filter = filter.map_or_else(|| json!({}), FieldFilter::to_json);
        let response = self
            .command(
                &self.collection_url(collection),
                &json!({"find": {"filter": filter}}),
            )
            .await?;
        extract_documents(response)
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<UpdateResult, StoreError> {
        let response = self
            .command(
                &self.collection_url(collection),
                &json!({"updateOne": {"filter": {"_id": id}, "update": {"$set": fields}}}),
            )
            .await?;
        parse_update_result(&response)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

/// Turns a non-empty `errors` array into a `StoreError::Api`.
fn check_errors(response: &Value) -> Result<(), StoreError> {
    let Some(errors) = response.get("errors").and_then(Value::as_array) else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }

    let messages: Vec<String> = errors
        .iter()
        .map(|raw| match ApiError::deserialize(raw) {
            Ok(ApiError {
                message: Some(message),
                error_code: Some(code),
            }) => format!("{code}: {message}"),
            Ok(ApiError {
                message: Some(message),
                ..
            }) => message,
            _ => raw.to_string(),
        })
        .collect();
    Err(StoreError::Api(messages.join("; ")))
}

fn status_field<'a>(response: &'a Value, field: &str) -> Result<&'a Value, StoreError> {
    response
        .get("status")
        .and_then(|s| s.get(field))
        .ok_or_else(|| StoreError::InvalidResponse(format!("missing status.{field} in {response}")))
}

/// Collection names from a `findCollections` response.
///
/// Names come back as plain strings, or as `{"name": ...}` objects when the
/// service is asked to explain collection options.
fn parse_collections(response: &Value) -> Result<Vec<String>, StoreError> {
    let collections = status_field(response, "collections")?
        .as_array()
        .ok_or_else(|| {
            StoreError::InvalidResponse(format!("collections is not a list: {response}"))
        })?;

    collections
        .iter()
        .map(|entry| match entry {
            Value::String(name) => Ok(name.clone()),
            other => other
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    StoreError::InvalidResponse(format!("bad collection entry: {other}"))
                }),
        })
        .collect()
}

/// First identifier from an `insertOne` response.
fn parse_inserted_id(response: &Value) -> Result<String, StoreError> {
    match status_field(response, "insertedIds")?
        .as_array()
        .and_then(|ids| ids.first())
    {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(StoreError::InvalidResponse(format!(
            "no inserted id in {response}"
        ))),
    }
}

/// Documents from a `find` response, which is either `data.documents` or a
/// bare list.
fn extract_documents(response: Value) -> Result<Vec<Value>, StoreError> {
    match response {
        Value::Array(documents) => Ok(documents),
        Value::Object(mut body) => match body.remove("data") {
            Some(Value::Object(mut data)) => match data.remove("documents") {
                Some(Value::Array(documents)) => Ok(documents),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(other) => Err(StoreError::InvalidResponse(format!(
                    "documents is not a list: {other}"
                ))),
            },
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(StoreError::InvalidResponse(format!(
                "data is not an object: {other}"
            ))),
        },
        other => Err(StoreError::InvalidResponse(format!(
            "unexpected find response: {other}"
        ))),
    }
}

/// Counts from an `updateOne` response.
fn parse_update_result(response: &Value) -> Result<UpdateResult, StoreError> {
    let count = |field: &str| -> Result<u64, StoreError> {
        status_field(response, field)?
            .as_u64()
            .ok_or_else(|| StoreError::InvalidResponse(format!("{field} is not a count")))
    };

    Ok(UpdateResult {
        matched_count: count("matchedCount")?,
        modified_count: count("modifiedCount")?,
    })
}
