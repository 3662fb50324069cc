//! Postseed Shared Library
//!
//! This crate contains the types and pure logic behind the Postseed tools:
//! post documents, engagement aggregation, mock data generation and the
//! document store abstraction.
//!
//! # Modules
//!
//! - [`models`] - Post documents and engagement summaries
//! - [`aggregation`] - Per-category engagement averages
//! - [`generator`] - Synthetic posts and engagement counters
//! - [`storage`] - Document store trait and in-memory implementation
//!
//! # Example
//!
//! ```
//! use shared::aggregation::aggregate_engagement;
//! use shared::generator::MockDataGenerator;
//!
//! let mut generator = MockDataGenerator::with_seed(1);
//! let docs: Vec<_> = (0..10)
//!     .map(|_| {
//!         let post = generator.generate_post();
//!         let engagement = generator.generate_engagement(post.post_type);
//!         post.with_engagement(engagement).to_document().unwrap()
//!     })
//!     .collect();
//!
//! let summaries = aggregate_engagement(&docs).unwrap();
//! let total: u64 = summaries.iter().map(|s| s.total_posts).sum();
//! assert_eq!(total, 10);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aggregation;
pub mod generator;
pub mod models;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
