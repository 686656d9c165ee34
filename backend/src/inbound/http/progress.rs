//! Streak, achievement and daily progress handlers.
//!
//! ```text
//! POST /api/v1/streak
//! POST /api/v1/achievements/check
//! GET  /api/v1/achievements
//! POST /api/v1/daily-progress {"mood":7,"content":"...","challenges":"..."}
//! ```

use actix_web::{get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::{AnnotationOutcome, DailyProgressOutcome, StreakUpdate};
use crate::domain::{Achievement, ErrorCode, StreakTransition, UserStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::check_ins::{AnnotationDto, CheckInDto, CheckInRequest};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[schema(example = "2026-03-10")]
    pub last_check_in: String,
}

impl From<UserStats> for StatsDto {
    fn from(value: UserStats) -> Self {
        Self {
            current_streak: value.current_streak,
            longest_streak: value.longest_streak,
            last_check_in: value.last_check_in.to_string(),
        }
    }
}

fn transition_name(transition: StreakTransition) -> String {
    let name = match transition {
        StreakTransition::Started => "started",
        StreakTransition::Unchanged => "unchanged",
        StreakTransition::Extended => "extended",
        StreakTransition::Reset => "reset",
    };
    name.to_owned()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDto {
    pub id: String,
    #[schema(example = "first-checkin")]
    pub achievement_key: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: String,
}

impl From<Achievement> for AchievementDto {
    fn from(value: Achievement) -> Self {
        Self {
            id: value.id.to_string(),
            achievement_key: value.achievement_key,
            title: value.title,
            description: value.description,
            unlocked_at: value.unlocked_at.to_rfc3339(),
        }
    }
}

pub(crate) fn achievement_dtos(achievements: Vec<Achievement>) -> Vec<AchievementDto> {
    achievements.into_iter().map(AchievementDto::from).collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreakResponse {
    pub stats: StatsDto,
    #[schema(example = "extended")]
    pub transition: String,
}

impl From<StreakUpdate> for StreakResponse {
    fn from(value: StreakUpdate) -> Self {
        Self {
            stats: value.stats.into(),
            transition: transition_name(value.transition),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AwardedResponse {
    pub awarded: Vec<AchievementDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AchievementsResponse {
    pub achievements: Vec<AchievementDto>,
}

/// Best-effort annotation result of the pipeline.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnnotationOutcomeDto {
    Annotated {
        ai: AnnotationDto,
    },
    Failed {
        #[schema(example = "completion_parse_failure")]
        code: String,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
}

impl From<AnnotationOutcome> for AnnotationOutcomeDto {
    fn from(value: AnnotationOutcome) -> Self {
        match value {
            AnnotationOutcome::Annotated(payload) => Self::Annotated { ai: payload.into() },
            AnnotationOutcome::Failed(error) => {
                let code = serde_json::to_value(error.code())
                    .ok()
                    .and_then(|value| value.as_str().map(str::to_owned))
                    .unwrap_or_default();
                let message = if error.code() == ErrorCode::InternalError {
                    "Internal server error".to_owned()
                } else {
                    error.message().to_owned()
                };
                let raw = error
                    .details()
                    .and_then(|details| details.get("raw"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned);
                Self::Failed {
                    code,
                    error: message,
                    raw,
                }
            }
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgressResponse {
    pub check_in: CheckInDto,
    pub stats: StatsDto,
    #[schema(example = "started")]
    pub transition: String,
    pub awarded: Vec<AchievementDto>,
    pub annotation: AnnotationOutcomeDto,
}

impl From<DailyProgressOutcome> for DailyProgressResponse {
    fn from(value: DailyProgressOutcome) -> Self {
        Self {
            check_in: value.check_in.into(),
            stats: value.streak.stats.into(),
            transition: transition_name(value.streak.transition),
            awarded: achievement_dtos(value.awarded),
            annotation: value.annotation.into(),
        }
    }
}

/// Advance the streak for today.
#[utoipa::path(
    post,
    path = "/api/v1/streak",
    responses(
        (status = 200, description = "Current streak counters", body = StreakResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure or contention", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "updateStreak"
)]
#[post("/streak")]
pub async fn update_streak(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StreakResponse>> {
    let user_id = session.require_user_id()?;
    let update = state.progress.update_streak(&user_id).await?;
    Ok(web::Json(update.into()))
}

/// Award every newly qualifying achievement.
#[utoipa::path(
    post,
    path = "/api/v1/achievements/check",
    responses(
        (status = 200, description = "Achievements unlocked by this call", body = AwardedResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "checkAchievements"
)]
#[post("/achievements/check")]
pub async fn check_achievements(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AwardedResponse>> {
    let user_id = session.require_user_id()?;
    let awarded = state.progress.check_achievements(&user_id).await?;
    Ok(web::Json(AwardedResponse {
        awarded: achievement_dtos(awarded),
    }))
}

/// Unlocked achievements, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/achievements",
    responses(
        (status = 200, description = "Unlocked achievements", body = AchievementsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "listAchievements"
)]
#[get("/achievements")]
pub async fn list_achievements(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AchievementsResponse>> {
    let user_id = session.require_user_id()?;
    let achievements = state.achievements_query.list(&user_id).await?;
    Ok(web::Json(AchievementsResponse {
        achievements: achievement_dtos(achievements),
    }))
}

/// Run the whole daily pipeline: check-in, streak, achievements, annotation.
///
/// A failed annotation does not fail the request; it is reported in the
/// `annotation` field while the stored check-in is returned as usual.
#[utoipa::path(
    post,
    path = "/api/v1/daily-progress",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Pipeline outcome", body = DailyProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["progress"],
    operation_id = "recordDailyProgress"
)]
#[post("/daily-progress")]
pub async fn record_daily_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckInRequest>,
) -> ApiResult<web::Json<DailyProgressResponse>> {
    let user_id = session.require_user_id()?;
    let submission = payload.into_inner().into_submission()?;
    let outcome = state.daily_progress.record(&user_id, submission).await?;
    Ok(web::Json(outcome.into()))
}
