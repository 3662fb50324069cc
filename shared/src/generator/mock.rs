//! Mock post generator.

use super::profile::{CategoryProfile, TOPICS, TOPIC_PLACEHOLDER};
use crate::models::{Engagement, Post, PostType};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Largest backdating offset applied to generated posts, in days.
pub const MAX_AGE_DAYS: i64 = 30;

/// Generates synthetic posts and engagement counters.
///
/// Generation is pure: nothing is written anywhere, only values are returned.
/// Use [`MockDataGenerator::with_seed`] for reproducible content.
///
/// # Example
///
/// ```
/// use shared::generator::MockDataGenerator;
///
/// let mut generator = MockDataGenerator::with_seed(7);
/// let post = generator.generate_post();
/// let engagement = generator.generate_engagement(post.post_type);
///
/// assert_eq!(post.likes, 0);
/// assert!(engagement.likes > 0);
/// ```
#[derive(Debug)]
pub struct MockDataGenerator {
    rng: StdRng,
}

impl MockDataGenerator {
    /// Creates a generator seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a generator whose output depends only on `seed`.
    ///
    /// Identifiers are derived from the same RNG, so two generators with the
    /// same seed produce identical posts apart from the wall-clock timestamp.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a random post type.
    pub fn generate_post_type(&mut self) -> PostType {
        *pick(&mut self.rng, &PostType::ALL)
    }

    /// Fills a random template of `post_type` with a random topic.
    pub fn generate_content(&mut self, post_type: PostType) -> String {
        let profile = CategoryProfile::for_type(post_type);
        let template = pick(&mut self.rng, profile.templates);
        let topic = pick(&mut self.rng, &TOPICS);
        template.replace(TOPIC_PLACEHOLDER, topic)
    }

    /// Draws engagement counters from the ranges of `post_type`.
    pub fn generate_engagement(&mut self, post_type: PostType) -> Engagement {
        let profile = CategoryProfile::for_type(post_type);
        Engagement {
            likes: self.rng.gen_range(profile.likes),
            shares: self.rng.gen_range(profile.shares),
            comments: self.rng.gen_range(profile.comments),
        }
    }

    /// Generates a post of a random type with zero counters.
    pub fn generate_post(&mut self) -> Post {
        let post_type = self.generate_post_type();
        self.generate_post_of(post_type)
    }

    /// Generates a post of `post_type` with zero counters.
    ///
    /// The timestamp is backdated by a whole number of days in
    /// `0..=MAX_AGE_DAYS`.
    pub fn generate_post_of(&mut self, post_type: PostType) -> Post {
        let age_days = self.rng.gen_range(0..=MAX_AGE_DAYS);
        let created_at = Utc::now() - Duration::days(age_days);
        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();

        Post {
            id: id.to_string(),
            post_type,
            content: self.generate_content(post_type),
            created_at,
            likes: 0,
            shares: 0,
            comments: 0,
        }
    }
}

impl Default for MockDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tables handed to this are compile-time constants and never empty.
fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    items
        .choose(rng)
        .unwrap_or_else(|| unreachable!("pick called with an empty table"))
}
