//! Dashboard aggregate handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::Dashboard;
use crate::inbound::http::ApiResult;
use crate::inbound::http::check_ins::CheckInDto;
use crate::inbound::http::daily_tasks::{DailyTaskDto, task_dtos};
use crate::inbound::http::progress::{AchievementDto, StatsDto, achievement_dtos};
use crate::inbound::http::roadmaps::LatestRoadmapResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One read of everything the landing page shows. Absent sections are null
/// or empty rather than errors.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub roadmap: LatestRoadmapResponse,
    pub last_check_in: Option<CheckInDto>,
    pub stats: Option<StatsDto>,
    pub achievements: Vec<AchievementDto>,
    pub today_tasks: Vec<DailyTaskDto>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(value: Dashboard) -> Self {
        Self {
            roadmap: value.roadmap.into(),
            last_check_in: value.last_check_in.map(CheckInDto::from),
            stats: value.stats.map(StatsDto::from),
            achievements: achievement_dtos(value.achievements),
            today_tasks: task_dtos(value.today_tasks),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard aggregate", body = DashboardResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardResponse>> {
    let user_id = session.require_user_id()?;
    let dashboard = state.dashboard.dashboard(&user_id).await?;
    Ok(web::Json(dashboard.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserStats;
    use crate::inbound::http::test_utils::{
        TestPorts, day, login_cookie, read_json, sample_check_in, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::json;

    async fn fetch(ports: TestPorts) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(test_app(ports, |cfg| {
            cfg.service(dashboard);
        }))
        .await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, read_json(res).await)
    }

    #[actix_web::test]
    async fn new_user_sees_empty_sections() {
        let mut ports = TestPorts::default();
        ports.dashboard.expect_dashboard().returning(|_| {
            Ok(Dashboard {
                roadmap: None,
                last_check_in: None,
                stats: None,
                achievements: Vec::new(),
                today_tasks: Vec::new(),
            })
        });

        let (status, body) = fetch(ports).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roadmap"]["roadmap"], serde_json::Value::Null);
        assert_eq!(body["lastCheckIn"], serde_json::Value::Null);
        assert_eq!(body["stats"], serde_json::Value::Null);
        assert_eq!(body["todayTasks"], json!([]));
    }

    #[actix_web::test]
    async fn populated_dashboard_reuses_resource_shapes() {
        let mut ports = TestPorts::default();
        ports.dashboard.expect_dashboard().returning(|user| {
            Ok(Dashboard {
                roadmap: None,
                last_check_in: Some(sample_check_in()),
                stats: Some(UserStats {
                    user_id: *user,
                    current_streak: 4,
                    longest_streak: 9,
                    last_check_in: day("2026-03-10"),
                }),
                achievements: Vec::new(),
                today_tasks: Vec::new(),
            })
        });

        let (_, body) = fetch(ports).await;

        assert_eq!(body["lastCheckIn"]["content"], "Reviewed the queue design");
        assert_eq!(body["stats"]["currentStreak"], 4);
        assert_eq!(body["stats"]["longestStreak"], 9);
    }
}
