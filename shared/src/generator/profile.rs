//! Per-category content templates and engagement ranges.

use crate::models::PostType;
use std::ops::RangeInclusive;

/// Placeholder replaced by a topic in every template.
pub const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Topics substituted into content templates.
pub const TOPICS: [&str; 6] = [
    "product launch",
    "tech tips",
    "behind the scenes",
    "customer story",
    "industry news",
    "team spotlight",
];

/// Content and engagement characteristics of one post type.
#[derive(Debug, Clone)]
pub struct CategoryProfile {
    /// Content templates containing [`TOPIC_PLACEHOLDER`].
    pub templates: &'static [&'static str],
    /// Inclusive range for generated likes.
    pub likes: RangeInclusive<u64>,
    /// Inclusive range for generated shares.
    pub shares: RangeInclusive<u64>,
    /// Inclusive range for generated comments.
    pub comments: RangeInclusive<u64>,
}

const CAROUSEL_TEMPLATES: &[&str] = &[
    "Swipe through our latest {topic} collection!",
    "10 tips for {topic} - Check all slides",
    "Before and After: {topic} transformation",
];

const REEL_TEMPLATES: &[&str] = &[
    "Quick tutorial: How to {topic}",
    "Watch this {topic} hack!",
    "Trending {topic} challenge",
];

const STATIC_TEMPLATES: &[&str] = &[
    "Today's highlight: {topic}",
    "New release: {topic}",
    "Featured {topic} of the day",
];

impl CategoryProfile {
    /// Returns the profile for a post type.
    #[must_use]
    pub fn for_type(post_type: PostType) -> Self {
        match post_type {
            PostType::Carousel => Self {
                templates: CAROUSEL_TEMPLATES,
                likes: 50..=200,
                shares: 10..=50,
                comments: 5..=30,
            },
            PostType::Reel => Self {
                templates: REEL_TEMPLATES,
                likes: 100..=500,
                shares: 20..=100,
                comments: 10..=50,
            },
            PostType::Static => Self {
                templates: STATIC_TEMPLATES,
                likes: 20..=100,
                shares: 5..=20,
                comments: 2..=15,
            },
        }
    }
}
