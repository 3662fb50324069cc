//! Post data model.
//!
//! Defines the `Post` document stored in the `social_media_posts` collection
//! and the `Engagement` counters applied to it after insertion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Name of the collection that holds post documents.
pub const COLLECTION_NAME: &str = "social_media_posts";

/// Field that carries the post category in stored documents.
pub const POST_TYPE_FIELD: &str = "post_type";

/// Content classification of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Multi-slide image post.
    Carousel,
    /// Short-form video.
    Reel,
    /// Single image.
    Static,
}

impl PostType {
    /// Every post type, in declaration order.
    pub const ALL: [Self; 3] = [Self::Carousel, Self::Reel, Self::Static];

    /// Returns the stored string form of this post type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::Reel => "reel",
            Self::Static => "static",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown post type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown post type '{0}' (expected carousel, reel or static)")]
pub struct ParsePostTypeError(pub String);

impl FromStr for PostType {
    type Err = ParsePostTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "carousel" => Ok(Self::Carousel),
            "reel" => Ok(Self::Reel),
            "static" => Ok(Self::Static),
            _ => Err(ParsePostTypeError(s.to_string())),
        }
    }
}

/// Engagement counters for a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    /// Number of likes.
    pub likes: u64,
    /// Number of shares.
    pub shares: u64,
    /// Number of comments.
    pub comments: u64,
}

impl Engagement {
    /// Creates a new set of engagement counters.
    #[must_use]
    pub const fn new(likes: u64, shares: u64, comments: u64) -> Self {
        Self {
            likes,
            shares,
            comments,
        }
    }
}

/// A social media post document.
///
/// # Example
///
/// ```
/// use shared::models::{Engagement, Post, PostType};
///
/// let post = Post::new(PostType::Reel, "Watch this tech tips hack!")
///     .with_engagement(Engagement::new(10, 5, 3));
///
/// assert_eq!(post.post_type, PostType::Reel);
/// assert_eq!(post.likes, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque document identifier.
    #[serde(rename = "_id")]
    pub id: String,

    /// Category of the post.
    pub post_type: PostType,

    /// Free-text body.
    pub content: String,

    /// When the post was created.
    pub created_at: DateTime<Utc>,

    /// Like counter.
    #[serde(default)]
    pub likes: u64,

    /// Share counter.
    #[serde(default)]
    pub shares: u64,

    /// Comment counter.
    #[serde(default)]
    pub comments: u64,
}

impl Post {
    /// Creates a post with a fresh UUID, the current timestamp and zero counters.
    #[must_use]
    pub fn new(post_type: PostType, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            post_type,
            content: content.into(),
            created_at: Utc::now(),
            likes: 0,
            shares: 0,
            comments: 0,
        }
    }

    /// Sets all three counters.
    #[must_use]
    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.likes = engagement.likes;
        self.shares = engagement.shares;
        self.comments = engagement.comments;
        self
    }

    /// Returns the current counters.
    #[must_use]
    pub const fn engagement(&self) -> Engagement {
        Engagement::new(self.likes, self.shares, self.comments)
    }

    /// Serializes the post into a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
