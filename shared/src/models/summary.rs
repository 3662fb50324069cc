//! Engagement summary model.

use serde::{Deserialize, Serialize};

/// Per-category engagement averages computed from a query result.
///
/// Summaries are transient: they are derived on every query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// The category the averages belong to.
    #[serde(rename = "_id")]
    pub post_type: String,
    /// Mean likes per post.
    pub avg_likes: f64,
    /// Mean shares per post.
    pub avg_shares: f64,
    /// Mean comments per post.
    pub avg_comments: f64,
    /// Number of posts that contributed.
    pub total_posts: u64,
}

impl std::fmt::Display for MetricSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Post Type: {}", self.post_type)?;
        writeln!(f, "Average Likes: {:.2}", self.avg_likes)?;
        writeln!(f, "Average Shares: {:.2}", self.avg_shares)?;
        writeln!(f, "Average Comments: {:.2}", self.avg_comments)?;
        write!(f, "Total Posts: {}", self.total_posts)
    }
}
