//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;
pub mod stats_service;

pub use link_service::{LinkService, TokenPolicy};
pub use redirect_service::{RedirectService, RedirectTarget};
pub use stats_service::{StatsReport, StatsService};
