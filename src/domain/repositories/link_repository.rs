//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Repository interface for the short link table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the link for a canonical URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Finds the link for an exact token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on database errors.
    async fn find_by_token(&self, token: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Inserts a new link.
    ///
    /// The write is atomic with respect to both uniqueness constraints.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateToken`] if the token is already taken
    /// - [`StoreError::DuplicateUrl`] if the URL was shortened concurrently
    /// - [`StoreError::Database`] on database errors
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;
}
