//! Composition of domain services into the HTTP adapter state.
//!
//! The binary picks concrete repositories (Diesel or [`MemoryStore`]) and a
//! completion adapter, then hands them here. End-to-end tests use the same
//! path with an in-memory store and a scripted completion.
//!
//! [`MemoryStore`]: crate::outbound::memory::MemoryStore

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AchievementRepository, AchievementsQuery, CheckInCommand, CheckInQuery, CheckInRepository,
    DailyTaskCommand, DailyTaskQuery, DailyTaskRepository, LoginService, ProfileCommand,
    ProfileQuery, ProfileRepository, ProgressCommand, RoadmapCommand, RoadmapProgressRepository,
    RoadmapQuery, RoadmapRepository, TextCompletion, UserStatsRepository,
};
use crate::domain::{
    CheckInService, DailyProgressService, DailyTaskRepositories, DailyTaskService,
    DashboardService, DashboardSources, InsightsService, ProfileService, ProgressRepositories,
    ProgressService, RoadmapService,
};
use crate::inbound::http::state::HttpState;

/// One repository per driven port.
///
/// Type parameters, in order: check-ins, stats, achievements, roadmaps,
/// roadmap progress, daily tasks, profiles.
pub struct RepositoryBundle<C, S, A, R, P, T, F> {
    pub check_ins: Arc<C>,
    pub stats: Arc<S>,
    pub achievements: Arc<A>,
    pub roadmaps: Arc<R>,
    pub progress: Arc<P>,
    pub tasks: Arc<T>,
    pub profiles: Arc<F>,
}

impl<X> RepositoryBundle<X, X, X, X, X, X, X> {
    /// Use one store for every port.
    pub fn shared(store: Arc<X>) -> Self {
        Self {
            check_ins: Arc::clone(&store),
            stats: Arc::clone(&store),
            achievements: Arc::clone(&store),
            roadmaps: Arc::clone(&store),
            progress: Arc::clone(&store),
            tasks: Arc::clone(&store),
            profiles: store,
        }
    }
}

impl<C, S, A, R, P, T, F> RepositoryBundle<C, S, A, R, P, T, F>
where
    C: CheckInRepository + 'static,
    S: UserStatsRepository + 'static,
    A: AchievementRepository + 'static,
    R: RoadmapRepository + 'static,
    P: RoadmapProgressRepository + 'static,
    T: DailyTaskRepository + 'static,
    F: ProfileRepository + 'static,
{
    /// Build every service and expose them as driving ports.
    pub fn into_http_state(
        self,
        login: Arc<dyn LoginService>,
        completion: Arc<dyn TextCompletion>,
        clock: Arc<dyn Clock>,
    ) -> HttpState {
        let check_in_service = Arc::new(CheckInService::new(
            Arc::clone(&self.check_ins),
            Arc::clone(&completion),
            Arc::clone(&clock),
        ));
        let progress_service = Arc::new(ProgressService::new(
            ProgressRepositories {
                stats: Arc::clone(&self.stats),
                achievements: self.achievements,
                check_ins: Arc::clone(&self.check_ins),
                roadmaps: Arc::clone(&self.roadmaps),
            },
            Arc::clone(&clock),
        ));
        let roadmap_service = Arc::new(RoadmapService::new(
            Arc::clone(&self.roadmaps),
            self.progress,
            Arc::clone(&self.profiles),
            Arc::clone(&completion),
            Arc::clone(&clock),
        ));
        let task_service = Arc::new(DailyTaskService::new(
            DailyTaskRepositories {
                tasks: self.tasks,
                check_ins: Arc::clone(&self.check_ins),
                roadmaps: self.roadmaps,
            },
            Arc::clone(&completion),
            Arc::clone(&clock),
        ));
        let profile_service = Arc::new(ProfileService::new(self.profiles));
        let insights = Arc::new(InsightsService::new(
            Arc::clone(&self.check_ins),
            completion,
            clock,
        ));

        let check_ins: Arc<dyn CheckInCommand> = check_in_service.clone();
        let progress: Arc<dyn ProgressCommand> = progress_service.clone();
        let roadmaps_query: Arc<dyn RoadmapQuery> = roadmap_service.clone();
        let achievements_query: Arc<dyn AchievementsQuery> = progress_service;
        let daily_tasks_query: Arc<dyn DailyTaskQuery> = task_service.clone();

        let daily_progress = Arc::new(DailyProgressService::new(
            Arc::clone(&check_ins),
            Arc::clone(&progress),
        ));
        let dashboard = Arc::new(DashboardService::new(DashboardSources {
            check_ins: self.check_ins,
            stats: self.stats,
            roadmaps: Arc::clone(&roadmaps_query),
            achievements: Arc::clone(&achievements_query),
            tasks: Arc::clone(&daily_tasks_query),
        }));

        let check_ins_query: Arc<dyn CheckInQuery> = check_in_service;
        let roadmaps: Arc<dyn RoadmapCommand> = roadmap_service;
        let daily_tasks: Arc<dyn DailyTaskCommand> = task_service;
        let profile: Arc<dyn ProfileCommand> = profile_service.clone();
        let profile_query: Arc<dyn ProfileQuery> = profile_service;

        HttpState {
            login,
            check_ins,
            check_ins_query,
            progress,
            achievements_query,
            daily_progress,
            roadmaps,
            roadmaps_query,
            insights,
            daily_tasks,
            daily_tasks_query,
            dashboard,
            profile,
            profile_query,
        }
    }
}
