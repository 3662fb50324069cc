//! `postseed seed`: fill the collection with mock posts.

use super::write_summaries;
use anyhow::Result;
use db::DatabaseConnection;
use shared::generator::MockDataGenerator;
use shared::models::MetricSummary;
use shared::storage::DocumentStore;
use std::io::Write;

/// Number of posts seeded when no count is given.
pub const DEFAULT_POST_COUNT: usize = 50;

/// Inserts `count` generated posts, sets their engagement, and reports the
/// resulting metrics.
///
/// Each post is inserted with zero counters and then updated once with
/// counters drawn for its type. Calls are strictly sequential; the first
/// failure aborts the run.
///
/// # Errors
///
/// Returns the first database or output error.
pub async fn run<S, W>(
    conn: &DatabaseConnection<S>,
    generator: &mut MockDataGenerator,
    count: usize,
    out: &mut W,
) -> Result<Vec<MetricSummary>>
where
    S: DocumentStore,
    W: Write,
{
    writeln!(out, "Generating {count} mock posts...")?;
    conn.create_collection().await?;

    for i in 1..=count {
        let post = generator.generate_post();
        let id = conn.insert_post(&post).await?;

        let engagement = generator.generate_engagement(post.post_type);
        conn.update_post_engagement(&id, &engagement).await?;

        writeln!(
            out,
            "Created post {i}/{count}: {} with {} likes",
            post.post_type, engagement.likes
        )?;
    }

    writeln!(out, "\nFinal Engagement Metrics:")?;
    let metrics = conn.get_engagement_metrics(None).await?;
    write_summaries(out, &metrics)?;

    tracing::info!(count, categories = metrics.len(), "Seeding complete");
    Ok(metrics)
}
