//! Storage traits and implementations.
//!
//! This module provides the abstraction over the external collection service.
//! The `DocumentStore` trait defines the interface, allowing different
//! implementations (in-memory, HTTP Data API, etc.).

pub mod document_store;

pub use document_store::{
    DocumentStore, FieldFilter, InMemoryDocumentStore, StoreError, UpdateResult,
};
