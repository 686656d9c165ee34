//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AchievementsQuery, CheckInCommand, CheckInQuery, DailyProgressCommand, DailyTaskCommand,
    DailyTaskQuery, DashboardQuery, InsightsQuery, LoginService, ProfileCommand, ProfileQuery,
    ProgressCommand, RoadmapCommand, RoadmapQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub check_ins: Arc<dyn CheckInCommand>,
    pub check_ins_query: Arc<dyn CheckInQuery>,
    pub progress: Arc<dyn ProgressCommand>,
    pub achievements_query: Arc<dyn AchievementsQuery>,
    pub daily_progress: Arc<dyn DailyProgressCommand>,
    pub roadmaps: Arc<dyn RoadmapCommand>,
    pub roadmaps_query: Arc<dyn RoadmapQuery>,
    pub insights: Arc<dyn InsightsQuery>,
    pub daily_tasks: Arc<dyn DailyTaskCommand>,
    pub daily_tasks_query: Arc<dyn DailyTaskQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub profile: Arc<dyn ProfileCommand>,
    pub profile_query: Arc<dyn ProfileQuery>,
}
