//! Daily task handlers.
//!
//! ```text
//! GET   /api/v1/daily-tasks?date=2026-03-10
//! POST  /api/v1/daily-tasks {"date":"2026-03-10","taskText":"Read the RFC"}
//! PATCH /api/v1/daily-tasks/{id} {"done":true}
//! POST  /api/v1/daily-tasks/generate
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DailyTask, Error, TaskText};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, missing_fields_error, parse_day, parse_optional_day,
    parse_uuid,
};

const DATE: FieldName = FieldName::new("date");
const TASK_TEXT: FieldName = FieldName::new("taskText");
const DONE: FieldName = FieldName::new("done");
const ID: FieldName = FieldName::new("id");

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyTasksQuery {
    /// UTC day; defaults to today.
    #[param(example = "2026-03-10")]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    #[schema(example = "2026-03-10")]
    pub date: Option<String>,
    #[schema(example = "Read the chapter on consensus")]
    pub task_text: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TaskDoneRequest {
    pub done: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskDto {
    pub id: String,
    pub task_text: String,
    #[schema(example = "2026-03-10")]
    pub task_date: String,
    pub done: bool,
    pub created_at: String,
    /// True when the text mentions learning, building, a project or a skill.
    pub roadmap_related: bool,
}

impl From<DailyTask> for DailyTaskDto {
    fn from(value: DailyTask) -> Self {
        let roadmap_related = value.is_roadmap_related();
        Self {
            id: value.id.to_string(),
            task_text: value.task_text,
            task_date: value.task_date.to_string(),
            done: value.done,
            created_at: value.created_at.to_rfc3339(),
            roadmap_related,
        }
    }
}

pub(crate) fn task_dtos(tasks: Vec<DailyTask>) -> Vec<DailyTaskDto> {
    tasks.into_iter().map(DailyTaskDto::from).collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyTasksResponse {
    pub tasks: Vec<DailyTaskDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyTaskResponse {
    pub task: DailyTaskDto,
}

fn parse_new_task(payload: NewTaskRequest) -> Result<(crate::domain::CalendarDay, TaskText), Error> {
    let (date, text) = match (payload.date, payload.task_text) {
        (Some(date), Some(text)) => (date, text),
        (date, text) => {
            let mut missing = Vec::new();
            if date.is_none() {
                missing.push(DATE);
            }
            if text.is_none() {
                missing.push(TASK_TEXT);
            }
            return Err(missing_fields_error(&missing));
        }
    };
    let day = parse_day(&date, DATE)?;
    let text = TaskText::new(&text).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": TASK_TEXT.as_str(),
            "code": "empty_task_text",
        }))
    })?;
    Ok((day, text))
}

/// Tasks for one day, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/daily-tasks",
    params(DailyTasksQuery),
    responses(
        (status = 200, description = "Tasks for the day", body = DailyTasksResponse),
        (status = 400, description = "Invalid date", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["daily-tasks"],
    operation_id = "listDailyTasks"
)]
#[get("/daily-tasks")]
pub async fn list_daily_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DailyTasksQuery>,
) -> ApiResult<web::Json<DailyTasksResponse>> {
    let user_id = session.require_user_id()?;
    let day = parse_optional_day(query.date.as_deref(), DATE)?;
    let tasks = state.daily_tasks_query.list(&user_id, day).await?;
    Ok(web::Json(DailyTasksResponse {
        tasks: task_dtos(tasks),
    }))
}

/// Add a task by hand.
#[utoipa::path(
    post,
    path = "/api/v1/daily-tasks",
    request_body = NewTaskRequest,
    responses(
        (status = 200, description = "Stored task", body = DailyTaskResponse),
        (status = 400, description = "Missing fields", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["daily-tasks"],
    operation_id = "addDailyTask"
)]
#[post("/daily-tasks")]
pub async fn add_daily_task(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewTaskRequest>,
) -> ApiResult<web::Json<DailyTaskResponse>> {
    let user_id = session.require_user_id()?;
    let (day, text) = parse_new_task(payload.into_inner())?;
    let task = state.daily_tasks.add(&user_id, day, text).await?;
    Ok(web::Json(DailyTaskResponse { task: task.into() }))
}

/// Mark a task done or not done.
#[utoipa::path(
    patch,
    path = "/api/v1/daily-tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    request_body = TaskDoneRequest,
    responses(
        (status = 200, description = "Updated task", body = DailyTaskResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Owned by another user", body = ErrorSchema),
        (status = 404, description = "No such task", body = ErrorSchema)
    ),
    tags = ["daily-tasks"],
    operation_id = "setDailyTaskDone"
)]
#[patch("/daily-tasks/{id}")]
pub async fn set_daily_task_done(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<TaskDoneRequest>,
) -> ApiResult<web::Json<DailyTaskResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_uuid(&path.into_inner(), ID)?;
    let done = payload.done.ok_or_else(|| missing_field_error(DONE))?;
    let task = state.daily_tasks.set_done(&user_id, id, done).await?;
    Ok(web::Json(DailyTaskResponse { task: task.into() }))
}

/// Generate today's tasks from the latest check-in, the roadmap and
/// yesterday's tasks.
#[utoipa::path(
    post,
    path = "/api/v1/daily-tasks/generate",
    responses(
        (status = 200, description = "Generated and stored tasks", body = DailyTasksResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Completion or storage failure", body = ErrorSchema)
    ),
    tags = ["daily-tasks"],
    operation_id = "generateDailyTasks"
)]
#[post("/daily-tasks/generate")]
pub async fn generate_daily_tasks(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DailyTasksResponse>> {
    let user_id = session.require_user_id()?;
    let tasks = state.daily_tasks.generate_today(&user_id).await?;
    Ok(web::Json(DailyTasksResponse {
        tasks: task_dtos(tasks),
    }))
}
