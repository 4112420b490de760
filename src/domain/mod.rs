//! Domain layer: entities and repository contracts.
//!
//! Repository traits define contracts implemented by `crate::infrastructure::persistence`;
//! business logic lives in [`crate::application::services`].
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
