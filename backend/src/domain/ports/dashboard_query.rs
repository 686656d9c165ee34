//! Driving port for the dashboard aggregate.

use async_trait::async_trait;

use crate::domain::{Achievement, CheckIn, DailyTask, Error, UserId, UserStats};

use super::RoadmapOverview;

/// Everything the dashboard shows in one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub roadmap: Option<RoadmapOverview>,
    pub last_check_in: Option<CheckIn>,
    pub stats: Option<UserStats>,
    pub achievements: Vec<Achievement>,
    pub today_tasks: Vec<DailyTask>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn dashboard(&self, user_id: &UserId) -> Result<Dashboard, Error>;
}
