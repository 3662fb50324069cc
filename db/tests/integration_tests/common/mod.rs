//! Common test utilities for the Data API integration tests.
//!
//! Provides a fake Data API server that speaks the JSON command protocol and
//! keeps its collections in an `InMemoryDocumentStore`.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use db::{DatabaseConfig, DatabaseConnection, DataApiStore};
use serde_json::{json, Map, Value};
use shared::storage::{DocumentStore, FieldFilter, InMemoryDocumentStore, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Token the fake server accepts.
pub const TEST_TOKEN: &str = "AstraCS:test-token";

/// Shared state behind the fake server.
#[derive(Clone, Default)]
pub struct FakeState {
    /// Backing collections.
    pub store: Arc<InMemoryDocumentStore>,
    /// Number of `createCollection` commands received.
    pub create_calls: Arc<AtomicUsize>,
}

impl FakeState {
    /// Number of `createCollection` commands received so far.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

/// A running fake Data API.
pub struct FakeDataApi {
    /// Base endpoint, e.g. `http://127.0.0.1:41234`.
    pub endpoint: String,
    /// Server state, for assertions.
    pub state: FakeState,
}

impl FakeDataApi {
    /// Binds to an ephemeral port and serves in the background.
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new()
            .route("/api/json/v1/{keyspace}", post(keyspace_command))
            .route(
                "/api/json/v1/{keyspace}/{collection}",
                post(collection_command),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}"),
            state,
        }
    }

    /// Config pointing at this server with the accepted token.
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::new(TEST_TOKEN, &self.endpoint)
    }

    /// A connection through the real HTTP store.
    pub fn connect(&self) -> DatabaseConnection<DataApiStore> {
        DatabaseConnection::connect(&self.config()).unwrap()
    }
}

fn api_error(code: &str, message: impl std::fmt::Display) -> Response {
    Json(json!({"errors": [{"message": message.to_string(), "errorCode": code}]})).into_response()
}

fn store_error(err: &StoreError) -> Response {
    let code = match err {
        StoreError::CollectionNotFound(_) => "COLLECTION_NOT_EXIST",
        StoreError::DuplicateId(_) => "DOCUMENT_ALREADY_EXISTS",
        _ => "SERVER_INTERNAL_ERROR",
    };
    api_error(code, err)
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("token").and_then(|v| v.to_str().ok()) {
        Some(TEST_TOKEN) => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"errors": [{"message": "UNAUTHENTICATED: Invalid token"}]})),
        )
            .into_response()),
    }
}

/// Splits `{"command": payload}` into its parts.
fn split_command(body: Value) -> Option<(String, Value)> {
    let Value::Object(map) = body else {
        return None;
    };
    map.into_iter().next()
}

async fn keyspace_command(
    State(state): State<FakeState>,
    Path(_keyspace): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }

    match split_command(body) {
        Some((command, _)) if command == "findCollections" => {
            match state.store.list_collections().await {
                Ok(names) => Json(json!({"status": {"collections": names}})).into_response(),
                Err(e) => store_error(&e),
            }
        }
        Some((command, payload)) if command == "createCollection" => {
            state.create_calls.fetch_add(1, Ordering::SeqCst);
            let Some(name) = payload.get("name").and_then(Value::as_str) else {
                return api_error("INVALID_REQUEST", "createCollection requires a name");
            };
            match state.store.create_collection(name).await {
                Ok(()) => Json(json!({"status": {"ok": 1}})).into_response(),
                Err(e) => store_error(&e),
            }
        }
        other => api_error("NO_COMMAND_MATCHED", format!("{other:?}")),
    }
}

async fn collection_command(
    State(state): State<FakeState>,
    Path((_keyspace, collection)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorized(&headers) {
        return rejection;
    }

    let Some((command, payload)) = split_command(body) else {
        return api_error("INVALID_REQUEST", "empty command");
    };

    match command.as_str() {
        "insertOne" => {
            let document = payload.get("document").cloned().unwrap_or(Value::Null);
            match state.store.insert_one(&collection, document).await {
                Ok(id) => Json(json!({"status": {"insertedIds": [id]}})).into_response(),
                Err(e) => store_error(&e),
            }
        }
        "find" => {
            let filter = payload
                .get("filter")
                .and_then(Value::as_object)
                .and_then(|f| f.iter().next())
                .map(|(field, value)| FieldFilter::equals(field.clone(), value.clone()));
            match state.store.find(&collection, filter.as_ref()).await {
                Ok(documents) => Json(json!({
                    "data": {"documents": documents, "nextPageState": null}
                }))
                .into_response(),
                Err(e) => store_error(&e),
            }
        }
        "updateOne" => {
            let id = payload
                .pointer("/filter/_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let fields: Map<String, Value> = payload
                .pointer("/update/$set")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            match state.store.update_one(&collection, &id, fields).await {
                Ok(result) => Json(json!({"status": {
                    "matchedCount": result.matched_count,
                    "modifiedCount": result.modified_count,
                }}))
                .into_response(),
                Err(e) => store_error(&e),
            }
        }
        other => api_error("NO_COMMAND_MATCHED", other),
    }
}
