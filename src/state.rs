//! Shared application state passed to every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::repositories::{LinkRepository, StatsRepository};
use crate::infrastructure::persistence::Database;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

/// Services wired to one store.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository, dyn StatsRepository>>,
    pub stats_service: Arc<StatsService<dyn StatsRepository>>,
    pub database: Database,
}

impl AppState {
    /// Builds the services on top of `database` using random tokens.
    pub fn new(database: Database, config: &Config) -> Self {
        Self::with_generator(database, config, Arc::new(RandomCodeGenerator))
    }

    /// Builds the services with a specific token source.
    pub fn with_generator(
        database: Database,
        config: &Config,
        generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        let (link_repository, stats_repository) = database.repositories();

        let link_service = LinkService::new(
            link_repository.clone(),
            generator,
            config.token_policy(),
            config.base_url.clone(),
        );
        let redirect_service = RedirectService::new(
            link_repository,
            stats_repository.clone(),
            config.home_url.clone(),
        );
        let stats_service = StatsService::new(stats_repository);

        Self {
            link_service: Arc::new(link_service),
            redirect_service: Arc::new(redirect_service),
            stats_service: Arc::new(stats_service),
            database,
        }
    }
}
