//! `postseed check`: connectivity smoke test.

use super::write_summaries;
use anyhow::Result;
use db::DatabaseConnection;
use shared::models::{Engagement, Post, PostType};
use shared::storage::DocumentStore;
use std::io::Write;
use std::time::Duration;

/// Time given to the service to index the test post before querying.
pub const INDEX_DELAY: Duration = Duration::from_secs(1);

/// The post inserted by the smoke test.
fn test_post() -> Post {
    Post::new(PostType::Reel, "Test post content").with_engagement(Engagement::new(10, 5, 3))
}

/// Ensures the collection, inserts one known post, and prints the metrics.
///
/// Any failure is reported on `out` and then returned unchanged.
///
/// # Errors
///
/// Returns the first database or output error.
pub async fn run<S, W>(
    conn: &DatabaseConnection<S>,
    index_delay: Duration,
    out: &mut W,
) -> Result<()>
where
    S: DocumentStore,
    W: Write,
{
    writeln!(out, "Testing database connection...")?;

    match smoke_test(conn, index_delay, out).await {
        Ok(()) => Ok(()),
        Err(e) => {
            writeln!(out, "Error during testing: {e}")?;
            Err(e)
        }
    }
}

async fn smoke_test<S, W>(
    conn: &DatabaseConnection<S>,
    index_delay: Duration,
    out: &mut W,
) -> Result<()>
where
    S: DocumentStore,
    W: Write,
{
    conn.create_collection().await?;
    writeln!(out, "Successfully connected to database")?;

    let id = conn.insert_post(&test_post()).await?;
    writeln!(out, "Inserted test post {id}")?;

    tokio::time::sleep(index_delay).await;

    let metrics = conn.get_engagement_metrics(None).await?;
    writeln!(out, "\nEngagement Metrics:")?;
    if metrics.is_empty() {
        writeln!(out, "No metrics available yet")?;
    } else {
        write_summaries(out, &metrics)?;
    }

    writeln!(out, "\nAll tests completed successfully!")?;
    Ok(())
}
