//! Postseed Database Layer
//!
//! This crate talks to the external document database over its JSON Data API
//! and exposes the post-specific operations used by the Postseed tools.
//!
//! # Architecture
//!
//! - [`DatabaseConfig`] loads and validates credentials from the environment
//! - [`DataApiStore`] implements [`shared::storage::DocumentStore`] over HTTP
//! - [`DatabaseConnection`] wraps any store with insert, update and metrics
//!   operations on the `social_media_posts` collection
//!
//! # Example
//!
//! ```no_run
//! use db::{DatabaseConfig, DatabaseConnection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), db::ConnectionError> {
//!     let config = DatabaseConfig::from_env()?;
//!     let conn = DatabaseConnection::connect(&config)?;
//!     conn.create_collection().await?;
//!
//!     for summary in conn.get_engagement_metrics(None).await? {
//!         println!("{summary}");
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod connection;
pub mod data_api;
pub mod error;

pub use config::DatabaseConfig;
pub use connection::DatabaseConnection;
pub use data_api::DataApiStore;
pub use error::ConnectionError;
