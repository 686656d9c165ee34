//! Domain primitives, evaluators and services.
//!
//! Purpose: hold the coaching rules independent of HTTP, SQL and the
//! completion provider. Entities and pure evaluators (streak transitions,
//! achievement thresholds, roadmap completion, completion payload parsing)
//! live beside the services that orchestrate them through [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`UserStats::advance`]: the streak state machine.
//! - [`evaluate_achievements`]: threshold rules over aggregate facts.
//! - [`parse_completion`]: fence stripping plus typed payload validation.
//! - `*Service` types implementing the driving ports.

pub mod achievements;
pub mod auth;
pub mod calendar;
pub mod check_in;
pub mod check_in_service;
pub mod completion;
pub mod daily_progress_service;
pub mod daily_task;
pub mod daily_task_service;
pub mod dashboard_service;
pub mod error;
pub mod insights_service;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod progress_service;
pub mod prompts;
pub mod roadmap;
pub mod roadmap_service;
pub mod streak;
pub mod trace_id;
pub mod user;

pub use self::achievements::{
    ACHIEVEMENT_RULES, Achievement, AchievementFacts, AchievementRule, NewAchievement,
    evaluate_achievements,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::calendar::{CalendarDay, CalendarDayParseError};
pub use self::check_in::{
    CheckIn, CheckInAnnotation, CheckInEdit, CheckInEntry, CheckInUpsert, CheckInValidationError,
    Mood,
};
pub use self::check_in_service::CheckInService;
pub use self::completion::{
    AnnotationPayload, CompletionParseError, CompletionSchema, TodayTasksPayload, WeeklyInsights,
    parse_completion, strip_code_fences,
};
pub use self::daily_progress_service::DailyProgressService;
pub use self::daily_task::{
    DailyTask, DailyTaskValidationError, NewDailyTask, TaskText, is_roadmap_related,
};
pub use self::daily_task_service::{DailyTaskRepositories, DailyTaskService};
pub use self::dashboard_service::{DashboardService, DashboardSources};
pub use self::error::{Error, ErrorCode};
pub use self::insights_service::InsightsService;
pub use self::profile::{CareerProfile, UserProfile};
pub use self::profile_service::ProfileService;
pub use self::progress_service::{MAX_STREAK_ATTEMPTS, ProgressRepositories, ProgressService};
pub use self::prompts::{
    annotation_prompt, roadmap_prompt, today_tasks_prompt, weekly_insights_prompt,
};
pub use self::roadmap::{
    CompletionSummary, Roadmap, RoadmapDocument, RoadmapItemType, RoadmapProgress, Timeline,
    UnknownRoadmapItemType,
};
pub use self::roadmap_service::RoadmapService;
pub use self::streak::{StreakTransition, UserStats};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdError};
