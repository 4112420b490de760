//! Repository trait definitions for the domain layer.
//!
//! These traits are the narrow query interface of the persistent store. Concrete
//! implementations live in `crate::infrastructure::persistence`; mock implementations
//! are generated with `mockall` for testing.
//!
//! - [`LinkRepository`] - Short link lookup and insertion
//! - [`StatsRepository`] - Visit recording and statistics
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;

/// Errors reported by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A link with the same token already exists.
    #[error("token already exists")]
    DuplicateToken,

    /// A link with the same URL already exists.
    #[error("url already shortened")]
    DuplicateUrl,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be decoded into a domain type.
    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}
