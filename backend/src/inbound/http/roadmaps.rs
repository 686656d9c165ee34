//! Roadmap handlers.
//!
//! ```text
//! POST /api/v1/roadmaps {"currentRole":"QA analyst","targetRole":"SRE"}
//! GET  /api/v1/roadmaps/latest
//! GET  /api/v1/roadmaps/next-steps
//! POST /api/v1/roadmaps/progress {"itemType":"skill","itemName":"Terraform"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{RoadmapOverview, RoadmapRequest};
use crate::domain::{
    CompletionSummary, Error, Roadmap, RoadmapDocument, RoadmapItemType, RoadmapProgress, Timeline,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

const ITEM_TYPE: FieldName = FieldName::new("itemType");
const ITEM_NAME: FieldName = FieldName::new("itemName");

/// Roles to plan between; either may be omitted to use the saved profile.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapRequest {
    #[schema(example = "QA analyst")]
    pub current_role: Option<String>,
    #[schema(example = "Site reliability engineer")]
    pub target_role: Option<String>,
}

impl From<GenerateRoadmapRequest> for RoadmapRequest {
    fn from(value: GenerateRoadmapRequest) -> Self {
        Self {
            current_role: value.current_role,
            target_role: value.target_role,
        }
    }
}

/// The four roadmap sections. `timeline` keeps month order.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocumentDto {
    pub skills_to_learn: Vec<String>,
    pub projects_to_build: Vec<String>,
    pub certifications: Vec<String>,
    #[schema(value_type = Object, example = json!({"Month 1": ["Learn Terraform basics"]}))]
    pub timeline: Timeline,
}

impl From<RoadmapDocument> for RoadmapDocumentDto {
    fn from(value: RoadmapDocument) -> Self {
        Self {
            skills_to_learn: value.skills_to_learn,
            projects_to_build: value.projects_to_build,
            certifications: value.certifications,
            timeline: value.timeline,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDto {
    pub id: String,
    pub created_at: String,
    pub roadmap_json: RoadmapDocumentDto,
}

impl From<Roadmap> for RoadmapDto {
    fn from(value: Roadmap) -> Self {
        Self {
            id: value.id.to_string(),
            created_at: value.created_at.to_rfc3339(),
            roadmap_json: value.document.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapProgressDto {
    pub id: String,
    #[schema(example = "skill")]
    pub item_type: String,
    pub item_name: String,
    pub completed: bool,
}

impl From<RoadmapProgress> for RoadmapProgressDto {
    fn from(value: RoadmapProgress) -> Self {
        Self {
            id: value.id.to_string(),
            item_type: value.item_type.to_string(),
            item_name: value.item_name,
            completed: value.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct CompletionSummaryDto {
    pub completed: usize,
    pub total: usize,
    #[schema(maximum = 100)]
    pub percent: u8,
}

impl From<CompletionSummary> for CompletionSummaryDto {
    fn from(value: CompletionSummary) -> Self {
        Self {
            completed: value.completed,
            total: value.total,
            percent: value.percent,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateRoadmapResponse {
    pub success: bool,
    pub roadmap: RoadmapDto,
}

/// Latest roadmap with progress; `roadmap` is null before the first one.
#[derive(Debug, Serialize, ToSchema)]
pub struct LatestRoadmapResponse {
    pub roadmap: Option<RoadmapDto>,
    pub progress: Vec<RoadmapProgressDto>,
    pub summary: CompletionSummaryDto,
}

impl From<Option<RoadmapOverview>> for LatestRoadmapResponse {
    fn from(value: Option<RoadmapOverview>) -> Self {
        match value {
            Some(overview) => Self {
                roadmap: Some(overview.roadmap.into()),
                progress: overview
                    .progress
                    .into_iter()
                    .map(RoadmapProgressDto::from)
                    .collect(),
                summary: overview.summary.into(),
            },
            None => Self {
                roadmap: None,
                progress: Vec::new(),
                summary: CompletionSummaryDto::default(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleProgressRequest {
    #[schema(example = "skill")]
    pub item_type: Option<String>,
    #[schema(example = "Terraform")]
    pub item_name: Option<String>,
}

impl ToggleProgressRequest {
    fn parse(self) -> Result<(RoadmapItemType, String), Error> {
        let raw_type = self.item_type.ok_or_else(|| missing_field_error(ITEM_TYPE))?;
        let item_name = self.item_name.ok_or_else(|| missing_field_error(ITEM_NAME))?;
        let item_type = raw_type.parse::<RoadmapItemType>().map_err(|_| {
            Error::invalid_request("itemType must be skill, project, certification or timeline")
                .with_details(json!({
                    "field": ITEM_TYPE.as_str(),
                    "value": raw_type,
                    "code": "invalid_item_type",
                }))
        })?;
        Ok((item_type, item_name))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleProgressResponse {
    pub progress: RoadmapProgressDto,
}

/// Generate and store a roadmap.
#[utoipa::path(
    post,
    path = "/api/v1/roadmaps",
    request_body = GenerateRoadmapRequest,
    responses(
        (status = 200, description = "Stored roadmap", body = GenerateRoadmapResponse),
        (status = 400, description = "Roles missing from request and profile", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Completion or storage failure", body = ErrorSchema)
    ),
    tags = ["roadmaps"],
    operation_id = "generateRoadmap"
)]
#[post("/roadmaps")]
pub async fn generate_roadmap(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<GenerateRoadmapRequest>,
) -> ApiResult<web::Json<GenerateRoadmapResponse>> {
    let user_id = session.require_user_id()?;
    let roadmap = state
        .roadmaps
        .generate(&user_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(GenerateRoadmapResponse {
        success: true,
        roadmap: roadmap.into(),
    }))
}

/// Most recent roadmap with progress rows and completion summary.
#[utoipa::path(
    get,
    path = "/api/v1/roadmaps/latest",
    responses(
        (status = 200, description = "Latest roadmap overview", body = LatestRoadmapResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["roadmaps"],
    operation_id = "latestRoadmap"
)]
#[get("/roadmaps/latest")]
pub async fn latest_roadmap(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LatestRoadmapResponse>> {
    let user_id = session.require_user_id()?;
    let overview = state.roadmaps_query.latest(&user_id).await?;
    Ok(web::Json(overview.into()))
}

/// Raw sections of the latest roadmap, or `{"steps": []}` without one.
#[utoipa::path(
    get,
    path = "/api/v1/roadmaps/next-steps",
    responses(
        (status = 200, description = "Roadmap sections", body = RoadmapDocumentDto),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["roadmaps"],
    operation_id = "roadmapNextSteps"
)]
#[get("/roadmaps/next-steps")]
pub async fn next_steps(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let response = match state.roadmaps_query.next_steps(&user_id).await? {
        Some(document) => HttpResponse::Ok().json(RoadmapDocumentDto::from(document)),
        None => HttpResponse::Ok().json(json!({ "steps": [] })),
    };
    Ok(response)
}

/// Flip the completion flag of one roadmap item.
#[utoipa::path(
    post,
    path = "/api/v1/roadmaps/progress",
    request_body = ToggleProgressRequest,
    responses(
        (status = 200, description = "Progress row after the toggle", body = ToggleProgressResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = ErrorSchema)
    ),
    tags = ["roadmaps"],
    operation_id = "toggleRoadmapProgress"
)]
#[post("/roadmaps/progress")]
pub async fn toggle_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ToggleProgressRequest>,
) -> ApiResult<web::Json<ToggleProgressResponse>> {
    let user_id = session.require_user_id()?;
    let (item_type, item_name) = payload.into_inner().parse()?;
    let progress = state
        .roadmaps
        .toggle_progress(&user_id, item_type, item_name)
        .await?;
    Ok(web::Json(ToggleProgressResponse {
        progress: progress.into(),
    }))
}
