//! Data models for Postseed.
//!
//! This module contains the post document and the engagement summary.

pub mod post;
pub mod summary;

pub use post::{
    Engagement, ParsePostTypeError, Post, PostType, COLLECTION_NAME, POST_TYPE_FIELD,
};
pub use summary::MetricSummary;
