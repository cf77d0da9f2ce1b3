//! Item capabilities and the shipped record type
//!
//! The query pipeline is generic over the item type. The built-in ranking
//! rules read items through the small capability traits here instead of
//! concrete fields, so any caller type can opt in. [`Record`] is the
//! concrete type the bundled views and the CLI operate on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engagement counters the weighted ranking rules read.
pub trait Engagement {
    fn likes(&self) -> u64;
    fn comments(&self) -> u64;
}

/// Creation timestamp the recency rule reads.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

/// A shareable post as the bundled views see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(id: u64, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            author: String::new(),
            tags: Vec::new(),
            likes: 0,
            comments: 0,
            created_at,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_engagement(mut self, likes: u64, comments: u64) -> Self {
        self.likes = likes;
        self.comments = comments;
        self
    }
}

impl Engagement for Record {
    fn likes(&self) -> u64 {
        self.likes
    }

    fn comments(&self) -> u64 {
        self.comments
    }
}

impl Timestamped for Record {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
