//! Check-in handlers.
//!
//! ```text
//! POST  /api/v1/check-ins {"mood":7,"content":"...","challenges":"...","date":"2026-03-09"}
//! GET   /api/v1/check-ins
//! PATCH /api/v1/check-ins/{id} {"mood":8}
//! POST  /api/v1/check-ins/{id}/annotation
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::SubmitCheckIn;
use crate::domain::{AnnotationPayload, CheckIn, CheckInEdit, CheckInEntry, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_mood, parse_optional_day, parse_uuid,
};

const MOOD: FieldName = FieldName::new("mood");
const CONTENT: FieldName = FieldName::new("content");
const DATE: FieldName = FieldName::new("date");
const ID: FieldName = FieldName::new("id");

/// Body for submitting the day's check-in.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    #[schema(example = 7, minimum = 1, maximum = 10)]
    pub mood: Option<i64>,
    pub content: Option<String>,
    pub challenges: Option<String>,
    /// Backdate to this UTC day instead of today.
    #[schema(example = "2026-03-09")]
    pub date: Option<String>,
}

impl CheckInRequest {
    pub(crate) fn into_submission(self) -> Result<SubmitCheckIn, Error> {
        let mood = self.mood.ok_or_else(|| missing_field_error(MOOD))?;
        let content = self.content.ok_or_else(|| missing_field_error(CONTENT))?;
        Ok(SubmitCheckIn {
            entry: CheckInEntry {
                mood: parse_mood(mood, MOOD)?,
                content,
                challenges: self.challenges.unwrap_or_default(),
            },
            date: parse_optional_day(self.date.as_deref(), DATE)?,
        })
    }
}

/// Partial update for an existing check-in.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInEditRequest {
    pub mood: Option<i64>,
    pub content: Option<String>,
    pub challenges: Option<String>,
}

impl TryFrom<CheckInEditRequest> for CheckInEdit {
    type Error = Error;

    fn try_from(value: CheckInEditRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            mood: value.mood.map(|raw| parse_mood(raw, MOOD)).transpose()?,
            content: value.content,
            challenges: value.challenges,
        })
    }
}

/// AI annotation attached to a check-in.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationDto {
    pub summary: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_insight: Option<String>,
}

impl From<AnnotationPayload> for AnnotationDto {
    fn from(value: AnnotationPayload) -> Self {
        Self {
            summary: value.summary,
            suggestions: value.suggestions,
            mood_insight: value.mood_insight,
        }
    }
}

/// Stored check-in as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDto {
    pub id: String,
    pub user_id: String,
    #[schema(example = "2026-03-10")]
    pub check_in_date: String,
    pub created_at: String,
    pub mood: u8,
    pub content: String,
    pub challenges: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_mood_insight: Option<String>,
}

impl From<CheckIn> for CheckInDto {
    fn from(value: CheckIn) -> Self {
        let (ai_summary, ai_suggestions, ai_mood_insight) = match value.annotation {
            Some(annotation) => (
                Some(annotation.summary),
                Some(annotation.suggestions),
                annotation.mood_insight,
            ),
            None => (None, None, None),
        };
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            check_in_date: value.check_in_date.to_string(),
            created_at: value.created_at.to_rfc3339(),
            mood: value.entry.mood.value(),
            content: value.entry.content,
            challenges: value.entry.challenges,
            ai_summary,
            ai_suggestions,
            ai_mood_insight,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub check_in: CheckInDto,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInHistoryResponse {
    pub check_ins: Vec<CheckInDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnnotationResponse {
    pub success: bool,
    pub ai: AnnotationDto,
}

/// Create or replace today's (or the given day's) check-in.
#[utoipa::path(
    post,
    path = "/api/v1/check-ins",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Stored check-in", body = CheckInResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["check-ins"],
    operation_id = "submitCheckIn"
)]
#[post("/check-ins")]
pub async fn submit_check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckInRequest>,
) -> ApiResult<web::Json<CheckInResponse>> {
    let user_id = session.require_user_id()?;
    let submission = payload.into_inner().into_submission()?;
    let check_in = state.check_ins.submit(&user_id, submission).await?;
    Ok(web::Json(CheckInResponse {
        check_in: check_in.into(),
    }))
}

/// Every check-in of the session user, oldest day first.
#[utoipa::path(
    get,
    path = "/api/v1/check-ins",
    responses(
        (status = 200, description = "Check-in history", body = CheckInHistoryResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["check-ins"],
    operation_id = "listCheckIns"
)]
#[get("/check-ins")]
pub async fn list_check_ins(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CheckInHistoryResponse>> {
    let user_id = session.require_user_id()?;
    let history = state.check_ins_query.history(&user_id).await?;
    Ok(web::Json(CheckInHistoryResponse {
        check_ins: history.into_iter().map(CheckInDto::from).collect(),
    }))
}

/// Edit mood, content or challenges of an existing check-in.
#[utoipa::path(
    patch,
    path = "/api/v1/check-ins/{id}",
    params(("id" = String, Path, description = "Check-in id")),
    request_body = CheckInEditRequest,
    responses(
        (status = 200, description = "Updated check-in", body = CheckInResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "No such check-in", body = ErrorSchema)
    ),
    tags = ["check-ins"],
    operation_id = "editCheckIn"
)]
#[patch("/check-ins/{id}")]
pub async fn edit_check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CheckInEditRequest>,
) -> ApiResult<web::Json<CheckInResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let edit = CheckInEdit::try_from(payload.into_inner())?;
    let check_in = state.check_ins.edit(&user_id, id, edit).await?;
    Ok(web::Json(CheckInResponse {
        check_in: check_in.into(),
    }))
}

/// Ask the completion service to annotate a stored check-in.
#[utoipa::path(
    post,
    path = "/api/v1/check-ins/{id}/annotation",
    params(("id" = String, Path, description = "Check-in id")),
    responses(
        (status = 200, description = "Annotation stored on the check-in", body = AnnotationResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "No such check-in", body = ErrorSchema),
        (status = 500, description = "Completion or storage failure; raw text in details", body = ErrorSchema)
    ),
    tags = ["check-ins"],
    operation_id = "annotateCheckIn"
)]
#[post("/check-ins/{id}/annotation")]
pub async fn annotate_check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<AnnotationResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let payload = state.check_ins.annotate(&user_id, id).await?;
    Ok(web::Json(AnnotationResponse {
        success: true,
        ai: payload.into(),
    }))
}
