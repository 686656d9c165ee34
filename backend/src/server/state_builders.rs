//! Builders for HTTP state and probe dependencies.
//!
//! Chooses Diesel repositories when a pool is configured and the in-memory
//! store otherwise, and the HTTP completion adapter only when an API key is
//! present.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::domain::ports::{FixtureLoginService, LoginService, TextCompletion};
use backend::inbound::http::health::ReadinessCheck;
use backend::inbound::http::state::HttpState;
use backend::outbound::completion::{CompletionSettings, DisabledCompletion, OpenAiHttpCompletion};
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselAchievementRepository, DieselCheckInRepository, DieselDailyTaskRepository,
    DieselProfileRepository, DieselRoadmapProgressRepository, DieselRoadmapRepository,
    DieselUserStatsRepository,
};
use backend::wiring::RepositoryBundle;

use super::ServerConfig;

/// Readiness check that round-trips the database.
pub(crate) struct PoolReadiness(pub(crate) DbPool);

#[async_trait]
impl ReadinessCheck for PoolReadiness {
    async fn check(&self) -> Result<(), String> {
        self.0.ping().await.map_err(|err| err.to_string())
    }
}

fn build_completion(
    settings: Option<&CompletionSettings>,
) -> std::io::Result<Arc<dyn TextCompletion>> {
    match settings {
        Some(settings) => {
            let adapter = OpenAiHttpCompletion::new(settings.clone()).map_err(|err| {
                std::io::Error::other(format!("completion client setup failed: {err}"))
            })?;
            info!(model = %settings.model, base_url = %settings.base_url, "completion enabled");
            Ok(Arc::new(adapter))
        }
        None => {
            warn!("no completion API key configured; AI features will report upstream failures");
            Ok(Arc::new(DisabledCompletion))
        }
    }
}

fn diesel_repositories(
    pool: &DbPool,
) -> RepositoryBundle<
    DieselCheckInRepository,
    DieselUserStatsRepository,
    DieselAchievementRepository,
    DieselRoadmapRepository,
    DieselRoadmapProgressRepository,
    DieselDailyTaskRepository,
    DieselProfileRepository,
> {
    RepositoryBundle {
        check_ins: Arc::new(DieselCheckInRepository::new(pool.clone())),
        stats: Arc::new(DieselUserStatsRepository::new(pool.clone())),
        achievements: Arc::new(DieselAchievementRepository::new(pool.clone())),
        roadmaps: Arc::new(DieselRoadmapRepository::new(pool.clone())),
        progress: Arc::new(DieselRoadmapProgressRepository::new(pool.clone())),
        tasks: Arc::new(DieselDailyTaskRepository::new(pool.clone())),
        profiles: Arc::new(DieselProfileRepository::new(pool.clone())),
    }
}

/// Build the handler state from the configured adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);
    let completion = build_completion(config.completion.as_ref())?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let state = match &config.db_pool {
        Some(pool) => diesel_repositories(pool).into_http_state(login, completion, clock),
        None => {
            warn!("no database configured; using the in-memory store");
            RepositoryBundle::shared(Arc::new(MemoryStore::new()))
                .into_http_state(login, completion, clock)
        }
    };
    Ok(state)
}
