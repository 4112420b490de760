//! ShortLink entity: one shortening of a destination URL.

use chrono::{DateTime, Utc};

/// A persisted mapping between a canonical URL and its short token.
///
/// Never mutated after creation. Each `url` maps to at most one token and each
/// `token` to exactly one `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub url: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(url: String, token: String, created_at: DateTime<Utc>) -> Self {
        Self {
            url,
            token,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub url: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        ShortLink::new(new_link.url, new_link.token, new_link.created_at)
    }
}
