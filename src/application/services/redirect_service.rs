//! Token resolution and visit recording.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::VisitEvent;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::error::AppError;
use crate::utils::url_normalizer::strip_unsafe_chars;

/// Where a resolved token sends the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The stored destination of a known token.
    Destination(String),
    /// The home location, used for unknown or empty tokens.
    Fallback(String),
}

impl RedirectTarget {
    pub fn location(&self) -> &str {
        match self {
            RedirectTarget::Destination(url) | RedirectTarget::Fallback(url) => url,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RedirectTarget::Fallback(_))
    }
}

/// Resolves tokens to destinations and records one visit per successful resolution.
pub struct RedirectService<L, S>
where
    L: LinkRepository + ?Sized,
    S: StatsRepository + ?Sized,
{
    link_repository: Arc<L>,
    stats_repository: Arc<S>,
    home_url: String,
}

impl<L, S> RedirectService<L, S>
where
    L: LinkRepository + ?Sized,
    S: StatsRepository + ?Sized + 'static,
{
    pub fn new(link_repository: Arc<L>, stats_repository: Arc<S>, home_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            stats_repository,
            home_url: home_url.into(),
        }
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Resolves a token.
    ///
    /// Unknown tokens are not an error: they resolve to the home location and
    /// record nothing. The visit for a known token is written on a spawned task,
    /// so the result never waits on it; a failed write is only logged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only if the token lookup itself fails.
    pub async fn resolve(&self, raw_token: &str) -> Result<RedirectTarget, AppError> {
        let token = strip_unsafe_chars(raw_token);
        let token = token.trim();

        if token.is_empty() {
            return Ok(self.fallback());
        }

        let Some(link) = self.link_repository.find_by_token(token).await? else {
            debug!(%token, "Unknown token, falling back to home");
            return Ok(self.fallback());
        };

        self.spawn_record_visit(VisitEvent::now(token));

        Ok(RedirectTarget::Destination(link.url))
    }

    fn spawn_record_visit(&self, visit: VisitEvent) {
        let stats_repository = Arc::clone(&self.stats_repository);
        tokio::spawn(async move {
            let token = visit.token.clone();
            if let Err(e) = stats_repository.record_visit(visit).await {
                warn!(%token, error = %e, "Failed to record visit");
            }
        });
    }

    fn fallback(&self) -> RedirectTarget {
        RedirectTarget::Fallback(self.home_url.clone())
    }
}
