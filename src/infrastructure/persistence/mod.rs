//! Persistent store implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with bound
//! parameters. Both engines share the same logical schema; see `migrations/`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`SqliteLinkRepository`] - Short link storage and retrieval
//! - [`PgStatsRepository`] / [`SqliteStatsRepository`] - Visit log and aggregates
//!
//! [`Database`] owns the pool and hands out repositories for whichever engine
//! `DATABASE_URL` selects.

pub mod database;
pub mod pg_link_repository;
pub mod pg_stats_repository;
pub mod sqlite_link_repository;
pub mod sqlite_stats_repository;

pub use database::Database;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_stats_repository::SqliteStatsRepository;
