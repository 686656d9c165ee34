//! Dashboard aggregate service.
//!
//! Reads every dashboard section concurrently; the first failing read fails
//! the whole aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    AchievementsQuery, CheckInRepository, DailyTaskQuery, Dashboard, DashboardQuery, RoadmapQuery,
    UserStatsRepository,
};
use crate::domain::{Error, UserId};

/// Read-side collaborators combined into the dashboard.
pub struct DashboardSources<C, S> {
    pub check_ins: Arc<C>,
    pub stats: Arc<S>,
    pub roadmaps: Arc<dyn RoadmapQuery>,
    pub achievements: Arc<dyn AchievementsQuery>,
    pub tasks: Arc<dyn DailyTaskQuery>,
}

/// Service implementing [`DashboardQuery`].
pub struct DashboardService<C, S> {
    sources: DashboardSources<C, S>,
}

impl<C, S> DashboardService<C, S> {
    pub fn new(sources: DashboardSources<C, S>) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl<C, S> DashboardQuery for DashboardService<C, S>
where
    C: CheckInRepository,
    S: UserStatsRepository,
{
    async fn dashboard(&self, user_id: &UserId) -> Result<Dashboard, Error> {
        let sources = &self.sources;
        let (roadmap, last_check_in, stats, achievements, today_tasks) = try_join!(
            sources.roadmaps.latest(user_id),
            async { Ok::<_, Error>(sources.check_ins.latest_for_user(user_id).await?) },
            async { Ok::<_, Error>(sources.stats.find(user_id).await?) },
            sources.achievements.list(user_id),
            sources.tasks.list(user_id, None),
        )?;
        Ok(Dashboard {
            roadmap,
            last_check_in,
            stats,
            achievements,
            today_tasks,
        })
    }
}
