//! Engagement aggregation over raw query results.
//!
//! Documents come back from the store as untyped JSON. Some drivers hand them
//! out as JSON-encoded strings, so each input is decoded before it is read.

use crate::models::{MetricSummary, POST_TYPE_FIELD};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while aggregating engagement.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// A string document could not be decoded as JSON.
    #[error("Failed to decode document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A document decoded to something other than a JSON object.
    #[error("Expected a JSON object document, got: {0}")]
    NotAnObject(String),

    /// A counter field held a value that is not an integer.
    #[error("Counter '{field}' is not an integer: {value}")]
    InvalidCounter {
        /// The offending field name.
        field: &'static str,
        /// The raw value found in the document.
        value: String,
    },
}

/// Running totals for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CategoryTotals {
    posts: u64,
    likes: i64,
    shares: i64,
    comments: i64,
}

/// Groups documents by category and derives per-category averages.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shared::aggregation::EngagementAggregator;
///
/// let mut aggregator = EngagementAggregator::new();
/// aggregator.add(&json!({"post_type": "reel", "likes": 10})).unwrap();
/// aggregator.add(&json!({"post_type": "reel", "likes": 20})).unwrap();
///
/// let summaries = aggregator.finish();
/// assert_eq!(summaries[0].avg_likes, 15.0);
/// assert_eq!(summaries[0].total_posts, 2);
/// ```
#[derive(Debug, Default)]
pub struct EngagementAggregator {
    totals: HashMap<String, CategoryTotals>,
}

impl EngagementAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of categories seen so far.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.totals.len()
    }

    /// Adds one document to the running totals.
    ///
    /// Documents without a category are skipped. Returns whether the document
    /// was counted.
    ///
    /// # Errors
    ///
    /// Returns an error if a string document is not valid JSON, the document is
    /// not an object, or a counter cannot be read as an integer.
    pub fn add(&mut self, document: &Value) -> Result<bool, AggregationError> {
        let decoded;
        let object = match document {
            Value::String(raw) => {
                decoded = serde_json::from_str::<Value>(raw)?;
                as_object(&decoded)?
            }
            other => as_object(other)?,
        };

        let Some(category) = category_of(object) else {
            tracing::debug!("Skipping document without post_type");
            return Ok(false);
        };

        let likes = counter(object, "likes")?;
        let shares = counter(object, "shares")?;
        let comments = counter(object, "comments")?;

        let totals = self.totals.entry(category).or_default();
        totals.posts += 1;
        totals.likes = totals.likes.saturating_add(likes);
        totals.shares = totals.shares.saturating_add(shares);
        totals.comments = totals.comments.saturating_add(comments);

        Ok(true)
    }

    /// Consumes the aggregator and emits one summary per category.
    ///
    /// Output order is unspecified.
    #[must_use]
    pub fn finish(self) -> Vec<MetricSummary> {
        self.totals
            .into_iter()
            .filter(|(_, totals)| totals.posts > 0)
            .map(|(post_type, totals)| MetricSummary {
                post_type,
                avg_likes: average(totals.likes, totals.posts),
                avg_shares: average(totals.shares, totals.posts),
                avg_comments: average(totals.comments, totals.posts),
                total_posts: totals.posts,
            })
            .collect()
    }
}

/// Aggregates a full result set in one pass.
///
/// # Errors
///
/// Returns the first [`AggregationError`] hit while reading the documents.
pub fn aggregate_engagement<'a, I>(documents: I) -> Result<Vec<MetricSummary>, AggregationError>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut aggregator = EngagementAggregator::new();
    for document in documents {
        aggregator.add(document)?;
    }
    Ok(aggregator.finish())
}

#[allow(clippy::cast_precision_loss)]
fn average(sum: i64, count: u64) -> f64 {
    sum as f64 / count as f64
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, AggregationError> {
    value
        .as_object()
        .ok_or_else(|| AggregationError::NotAnObject(value.to_string()))
}

/// Absent, null, `false`, zero and empty values all count as missing.
#[allow(clippy::float_cmp)]
fn category_of(object: &Map<String, Value>) -> Option<String> {
    match object.get(POST_TYPE_FIELD)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Missing and null counters read as zero, booleans as 0 or 1. Floats
/// truncate toward zero.
fn counter(object: &Map<String, Value>, field: &'static str) -> Result<i64, AggregationError> {
    let invalid = |value: &Value| AggregationError::InvalidCounter {
        field,
        value: value.to_string(),
    };

    match object.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Bool(b)) => Ok(i64::from(*b)),
        Some(value @ Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if let Some(f) = n.as_f64().filter(|f| f.is_finite()) {
                #[allow(clippy::cast_possible_truncation)]
                Ok(f.trunc() as i64)
            } else {
                Err(invalid(value))
            }
        }
        Some(value @ Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(value)),
        Some(value) => Err(invalid(value)),
    }
}
