//! Weekly insights handler.
//!
//! ```text
//! GET /api/v1/insights/weekly
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::WeeklyInsights;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const NO_CHECK_INS_MESSAGE: &str = "No check-ins this week.";

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsightsDto {
    pub weekly_summary: String,
    pub mood_analysis: String,
    pub progress_achievements: Vec<String>,
    pub recurring_challenges: Vec<String>,
    pub next_week_recommendations: Vec<String>,
}

impl From<WeeklyInsights> for WeeklyInsightsDto {
    fn from(value: WeeklyInsights) -> Self {
        Self {
            weekly_summary: value.weekly_summary,
            mood_analysis: value.mood_analysis,
            progress_achievements: value.progress_achievements,
            recurring_challenges: value.recurring_challenges,
            next_week_recommendations: value.next_week_recommendations,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyInsightsResponse {
    pub insights: WeeklyInsightsDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InsightsMessageResponse {
    #[schema(example = "No check-ins this week.")]
    pub message: String,
}

/// AI insights over the last seven UTC days, computed on demand.
#[utoipa::path(
    get,
    path = "/api/v1/insights/weekly",
    responses(
        (status = 200, description = "Insights, or a message when the week is empty", body = WeeklyInsightsResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Completion or storage failure", body = ErrorSchema)
    ),
    tags = ["insights"],
    operation_id = "weeklyInsights"
)]
#[get("/insights/weekly")]
pub async fn weekly_insights(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let response = match state.insights.weekly(&user_id).await? {
        Some(insights) => HttpResponse::Ok().json(WeeklyInsightsResponse {
            insights: insights.into(),
        }),
        None => HttpResponse::Ok().json(InsightsMessageResponse {
            message: NO_CHECK_INS_MESSAGE.to_owned(),
        }),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::inbound::http::test_utils::{TestPorts, login_cookie, read_json, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::json;

    async fn call(ports: TestPorts) -> (StatusCode, serde_json::Value) {
        let app = actix_test::init_service(test_app(ports, |cfg| {
            cfg.service(weekly_insights);
        }))
        .await;
        let cookie = login_cookie(&app).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/insights/weekly")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, read_json(res).await)
    }

    #[actix_web::test]
    async fn empty_week_returns_message() {
        let mut ports = TestPorts::default();
        ports.insights.expect_weekly().returning(|_| Ok(None));

        let (status, body) = call(ports).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "No check-ins this week."}));
    }

    #[actix_web::test]
    async fn insights_are_wrapped() {
        let mut ports = TestPorts::default();
        ports.insights.expect_weekly().returning(|_| {
            Ok(Some(WeeklyInsights {
                weekly_summary: "Consistent week".into(),
                mood_analysis: "Rising".into(),
                progress_achievements: vec!["Shipped v2".into()],
                recurring_challenges: Vec::new(),
                next_week_recommendations: vec!["Pair more".into()],
            }))
        });

        let (_, body) = call(ports).await;

        assert_eq!(body["insights"]["weeklySummary"], "Consistent week");
        assert_eq!(body["insights"]["recurringChallenges"], json!([]));
    }

    #[actix_web::test]
    async fn parse_failure_is_a_server_error_with_raw_text() {
        let mut ports = TestPorts::default();
        ports
            .insights
            .expect_weekly()
            .returning(|_| Err(Error::completion_parse_failure("not JSON", "nope")));

        let (status, body) = call(ports).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"]["raw"], "nope");
    }
}
