//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations over the repository traits and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Normalization, idempotent lookup, token assignment
//! - [`services::redirect_service::RedirectService`] - Token resolution and visit recording
//! - [`services::stats_service::StatsService`] - Visit statistics

pub mod services;
