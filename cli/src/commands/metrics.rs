//! `postseed metrics`: report engagement averages without writing anything.

use super::write_summaries;
use anyhow::Result;
use db::DatabaseConnection;
use shared::models::{MetricSummary, PostType};
use shared::storage::DocumentStore;
use std::io::Write;

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable blocks.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
}

/// Prints the metric summaries, optionally for a single post type.
///
/// # Errors
///
/// Returns the first database, serialization or output error.
pub async fn run<S, W>(
    conn: &DatabaseConnection<S>,
    post_type: Option<PostType>,
    format: Format,
    out: &mut W,
) -> Result<Vec<MetricSummary>>
where
    S: DocumentStore,
    W: Write,
{
    let metrics = conn.get_engagement_metrics(post_type).await?;

    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&metrics)?)?,
        Format::Text if metrics.is_empty() => writeln!(out, "No metrics available yet")?,
        Format::Text => {
            writeln!(out, "Engagement Metrics:")?;
            write_summaries(out, &metrics)?;
        }
    }

    Ok(metrics)
}
