//! Engagement metric aggregation.
//!
//! Turns a set of post documents into per-category averages.

pub mod engagement;

pub use engagement::{aggregate_engagement, AggregationError, EngagementAggregator};
