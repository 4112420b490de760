//! Link shortening service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::normalize_url;

/// Token length used when none is configured.
pub const DEFAULT_TOKEN_LENGTH: usize = 4;

/// Attempt bound used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 200;

/// Path segments routed to fixed endpoints. A token equal to one of these could
/// never be resolved, so the generator's output is skipped when it matches.
pub const RESERVED_TOKENS: &[&str] = &["api", "health"];

/// Shape of generated tokens and the bound on the collision loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub length: usize,
    pub max_attempts: usize,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for creating and retrieving short links.
///
/// Handles URL normalization, idempotent re-shortening and collision-free token
/// assignment.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
    policy: TokenPolicy,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix under which tokens are served.
    pub fn new(
        link_repository: Arc<L>,
        generator: Arc<dyn CodeGenerator>,
        policy: TokenPolicy,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            generator,
            policy,
            base_url: base_url.into(),
        }
    }

    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    /// Shortens a raw URL.
    ///
    /// # Deduplication
    ///
    /// If the normalized URL already has a link, that link is returned unchanged and
    /// nothing is written.
    ///
    /// # Token Assignment
    ///
    /// Candidates are drawn from the generator and checked against the store, at most
    /// [`TokenPolicy::max_attempts`] times. Candidates in [`RESERVED_TOKENS`] count as
    /// collisions. A token conflict reported by the insert
    /// itself (a concurrent writer took the same candidate) consumes one attempt. A URL
    /// conflict means a concurrent request shortened the same URL first; its link is
    /// re-read and returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is rejected by normalization
    /// - [`AppError::Exhausted`] if no free token was found within the bound
    /// - [`AppError::Internal`] on store errors
    pub async fn shorten(&self, raw_url: &str) -> Result<ShortLink, AppError> {
        let url = normalize_url(raw_url).map_err(|e| {
            AppError::invalid_url(
                "Invalid URL",
                json!({ "reason": e.reason(), "message": e.to_string() }),
            )
        })?;

        if let Some(existing) = self.link_repository.find_by_url(&url).await? {
            debug!(%url, token = %existing.token, "URL already shortened");
            return Ok(existing);
        }

        for attempt in 1..=self.policy.max_attempts {
            let token = self.generator.generate(self.policy.length);

            if RESERVED_TOKENS.contains(&token.as_str()) {
                debug!(%token, attempt, "Reserved token skipped");
                continue;
            }

            if self.link_repository.find_by_token(&token).await?.is_some() {
                debug!(%token, attempt, "Token collision");
                continue;
            }

            let new_link = NewShortLink {
                url: url.clone(),
                token,
                created_at: Utc::now(),
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    info!(url = %link.url, token = %link.token, attempt, "Short link created");
                    return Ok(link);
                }
                Err(StoreError::DuplicateToken) => {
                    warn!(attempt, "Token taken by a concurrent insert, retrying");
                }
                Err(StoreError::DuplicateUrl) => {
                    debug!(%url, "URL shortened concurrently, returning existing link");
                    return self.link_repository.find_by_url(&url).await?.ok_or_else(|| {
                        AppError::internal(
                            "Short link missing after URL conflict",
                            json!({ "url": url }),
                        )
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            %url,
            attempts = self.policy.max_attempts,
            length = self.policy.length,
            "Token space exhausted"
        );

        Err(AppError::exhausted(
            "Failed to find a free token",
            json!({
                "attempts": self.policy.max_attempts,
                "length": self.policy.length,
            }),
        ))
    }

    /// Retrieves a link by its token without recording a visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has the token.
    pub async fn get_link_by_token(&self, token: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "token": token })))
    }

    /// Constructs the full public short URL for a token.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), token)
    }
}
