//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TextCompletion`]) are implemented by the
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`LoginService`])
//! are implemented by domain services and called by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod achievement_repository;
mod check_in_command;
mod check_in_repository;
mod daily_progress_command;
mod daily_task_command;
mod daily_task_repository;
mod dashboard_query;
mod insights_query;
mod login_service;
mod profile_command;
mod profile_repository;
mod progress_command;
mod roadmap_command;
mod roadmap_repository;
mod text_completion;
mod user_stats_repository;

#[cfg(test)]
pub use achievement_repository::MockAchievementRepository;
pub use achievement_repository::{AchievementRepository, AchievementRepositoryError};
#[cfg(test)]
pub use check_in_command::{MockCheckInCommand, MockCheckInQuery};
pub use check_in_command::{CheckInCommand, CheckInQuery, SubmitCheckIn};
#[cfg(test)]
pub use check_in_repository::MockCheckInRepository;
pub use check_in_repository::{CheckInRepository, CheckInRepositoryError};
#[cfg(test)]
pub use daily_progress_command::MockDailyProgressCommand;
pub use daily_progress_command::{AnnotationOutcome, DailyProgressCommand, DailyProgressOutcome};
#[cfg(test)]
pub use daily_task_command::{MockDailyTaskCommand, MockDailyTaskQuery};
pub use daily_task_command::{DailyTaskCommand, DailyTaskQuery};
#[cfg(test)]
pub use daily_task_repository::MockDailyTaskRepository;
pub use daily_task_repository::{DailyTaskRepository, DailyTaskRepositoryError};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{Dashboard, DashboardQuery};
#[cfg(test)]
pub use insights_query::MockInsightsQuery;
pub use insights_query::InsightsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use profile_command::{MockProfileCommand, MockProfileQuery};
pub use profile_command::{ProfileCommand, ProfileQuery};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use progress_command::{MockAchievementsQuery, MockProgressCommand};
pub use progress_command::{AchievementsQuery, ProgressCommand, StreakUpdate};
#[cfg(test)]
pub use roadmap_command::{MockRoadmapCommand, MockRoadmapQuery};
pub use roadmap_command::{RoadmapCommand, RoadmapOverview, RoadmapQuery, RoadmapRequest};
#[cfg(test)]
pub use roadmap_repository::{MockRoadmapProgressRepository, MockRoadmapRepository};
pub use roadmap_repository::{
    NewRoadmap, RoadmapProgressRepository, RoadmapRepository, RoadmapRepositoryError,
};
#[cfg(test)]
pub use text_completion::MockTextCompletion;
pub use text_completion::{CompletionRequest, CompletionServiceError, TextCompletion};
#[cfg(test)]
pub use user_stats_repository::MockUserStatsRepository;
pub use user_stats_repository::{UserStatsRepository, UserStatsRepositoryError};
