//! Integration tests for the Data API wire protocol.
//!
//! Tests cover:
//! - Collection listing and creation
//! - Insert, find and update commands
//! - Error envelopes and authentication failures

use db::{DatabaseConfig, DataApiStore};
use serde_json::{json, Map};
use shared::storage::{DocumentStore, FieldFilter, StoreError};

use super::common::{FakeDataApi, TEST_TOKEN};

const COLLECTION: &str = "social_media_posts";

fn store(server: &FakeDataApi) -> DataApiStore {
    DataApiStore::new(&server.config()).unwrap()
}

#[tokio::test]
async fn test_list_and_create_collections() {
    let server = FakeDataApi::start().await;
    let store = store(&server);

    assert!(store.list_collections().await.unwrap().is_empty());

    store.create_collection(COLLECTION).await.unwrap();

    assert_eq!(store.list_collections().await.unwrap(), vec![COLLECTION]);
    assert_eq!(server.state.create_calls(), 1);
}

#[tokio::test]
async fn test_insert_returns_document_id() {
    let server = FakeDataApi::start().await;
    let store = store(&server);
    store.create_collection(COLLECTION).await.unwrap();

    let id = store
        .insert_one(COLLECTION, json!({"_id": "post-1", "post_type": "reel"}))
        .await
        .unwrap();

    assert_eq!(id, "post-1");
    assert_eq!(server.state.store.count(COLLECTION).unwrap(), 1);
}

#[tokio::test]
async fn test_find_with_equality_filter() {
    let server = FakeDataApi::start().await;
    let store = store(&server);
    store.create_collection(COLLECTION).await.unwrap();
    for (id, post_type) in [("a", "reel"), ("b", "carousel"), ("c", "reel")] {
        store
            .insert_one(COLLECTION, json!({"_id": id, "post_type": post_type}))
            .await
            .unwrap();
    }

    let all = store.find(COLLECTION, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let filter = FieldFilter::equals("post_type", "carousel");
    let carousels = store.find(COLLECTION, Some(&filter)).await.unwrap();
    assert_eq!(carousels.len(), 1);
    assert_eq!(carousels[0]["_id"], "b");
}

#[tokio::test]
async fn test_update_sets_counters() {
    let server = FakeDataApi::start().await;
    let store = store(&server);
    store.create_collection(COLLECTION).await.unwrap();
    store
        .insert_one(COLLECTION, json!({"_id": "p", "likes": 0, "shares": 0}))
        .await
        .unwrap();

    let mut fields = Map::new();
    fields.insert("likes".to_string(), json!(120));
    fields.insert("shares".to_string(), json!(12));
    let result = store.update_one(COLLECTION, "p", fields).await.unwrap();

    assert_eq!(result.matched_count, 1);
    assert_eq!(result.modified_count, 1);
    let docs = store.find(COLLECTION, None).await.unwrap();
    assert_eq!(docs[0]["likes"], 120);
    assert_eq!(docs[0]["shares"], 12);
}

#[tokio::test]
async fn test_missing_collection_surfaces_api_error() {
    let server = FakeDataApi::start().await;
    let store = store(&server);

    let result = store.find("nope", None).await;

    match result {
        Err(StoreError::Api(message)) => assert!(message.starts_with("COLLECTION_NOT_EXIST")),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_insert_surfaces_api_error() {
    let server = FakeDataApi::start().await;
    let store = store(&server);
    store.create_collection(COLLECTION).await.unwrap();
    store
        .insert_one(COLLECTION, json!({"_id": "same"}))
        .await
        .unwrap();

    let result = store.insert_one(COLLECTION, json!({"_id": "same"})).await;

    assert!(matches!(result, Err(StoreError::Api(m)) if m.contains("DOCUMENT_ALREADY_EXISTS")));
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let server = FakeDataApi::start().await;
    let config = DatabaseConfig::new("AstraCS:wrong", &server.endpoint);
    let store = DataApiStore::new(&config).unwrap();

    let result = store.list_collections().await;

    assert!(matches!(result, Err(StoreError::Api(m)) if m.starts_with("HTTP 401")));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // Nothing listens on the discard port of the loopback interface.
    let config = DatabaseConfig::new(TEST_TOKEN, "http://127.0.0.1:9");
    let store = DataApiStore::new(&config).unwrap();

    let result = store.list_collections().await;

    assert!(matches!(result, Err(StoreError::Transport(_))));
}
