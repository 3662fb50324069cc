//! Integration tests for the connection facade over HTTP.
//!
//! Tests cover:
//! - Idempotent collection creation
//! - The insert, update and metrics flow used by the seeding tool
//! - Metrics filtered by post type

use db::ConnectionError;
use shared::generator::MockDataGenerator;
use shared::models::{Engagement, Post, PostType};
use shared::storage::StoreError;

use super::common::FakeDataApi;

#[tokio::test]
async fn test_create_collection_is_idempotent() {
    let server = FakeDataApi::start().await;
    let conn = server.connect();

    assert!(conn.create_collection().await.unwrap());
    assert!(!conn.create_collection().await.unwrap());

    assert_eq!(server.state.create_calls(), 1);
    assert_eq!(
        server.state.store.count(conn.collection_name()).unwrap(),
        0
    );
}

#[tokio::test]
async fn test_seed_flow_produces_metrics() {
    let server = FakeDataApi::start().await;
    let conn = server.connect();
    conn.create_collection().await.unwrap();

    let mut generator = MockDataGenerator::with_seed(21);
    let mut inserted = 0;
    for _ in 0..12 {
        let post = generator.generate_post();
        let id = conn.insert_post(&post).await.unwrap();
        assert_eq!(id, post.id);

        let engagement = generator.generate_engagement(post.post_type);
        let result = conn.update_post_engagement(&id, &engagement).await.unwrap();
        assert_eq!(result.matched_count, 1);
        inserted += 1;
    }

    let metrics = conn.get_engagement_metrics(None).await.unwrap();
    let total: u64 = metrics.iter().map(|m| m.total_posts).sum();
    assert_eq!(total, inserted);
    assert!(metrics.iter().all(|m| m.avg_likes > 0.0));
}

#[tokio::test]
async fn test_metrics_for_single_post_type() {
    let server = FakeDataApi::start().await;
    let conn = server.connect();
    conn.create_collection().await.unwrap();

    let reel = Post::new(PostType::Reel, "Trending behind the scenes challenge")
        .with_engagement(Engagement::new(10, 5, 3));
    let other_reel = Post::new(PostType::Reel, "Watch this tech tips hack!")
        .with_engagement(Engagement::new(20, 7, 5));
    let carousel = Post::new(PostType::Carousel, "10 tips for industry news - Check all slides")
        .with_engagement(Engagement::new(99, 9, 9));
    for post in [&reel, &other_reel, &carousel] {
        conn.insert_post(post).await.unwrap();
    }

    let metrics = conn
        .get_engagement_metrics(Some(PostType::Reel))
        .await
        .unwrap();

    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].post_type, "reel");
    assert_eq!(metrics[0].avg_likes, 15.0);
    assert_eq!(metrics[0].avg_shares, 6.0);
    assert_eq!(metrics[0].avg_comments, 4.0);
    assert_eq!(metrics[0].total_posts, 2);
}

#[tokio::test]
async fn test_insert_before_collection_exists_fails() {
    let server = FakeDataApi::start().await;
    let conn = server.connect();

    let result = conn
        .insert_post(&Post::new(PostType::Static, "New release: team spotlight"))
        .await;

    assert!(matches!(
        result,
        Err(ConnectionError::Store(StoreError::Api(_)))
    ));
}
