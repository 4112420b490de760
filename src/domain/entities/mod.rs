//! Core domain entities.
//!
//! - [`ShortLink`] - A canonical URL and its short token
//! - [`VisitEvent`] - One redirect through a known token
//!
//! Creation inputs use separate structs (`NewShortLink`). Aggregates returned by
//! statistics queries ([`DailyVisits`], [`TopToken`], [`CreationSpan`]) live next to
//! the visit entity.

pub mod link;
pub mod visit;

pub use link::{NewShortLink, ShortLink};
pub use visit::{CreationSpan, DailyVisits, TopToken, VisitEvent};
