//! Synthetic post generation for seeding a collection.

pub mod mock;
pub mod profile;

pub use mock::{MockDataGenerator, MAX_AGE_DAYS};
pub use profile::{CategoryProfile, TOPICS};
