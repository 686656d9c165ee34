//! Career profile handlers.
//!
//! ```text
//! GET /api/v1/profile
//! PUT /api/v1/profile {"currentRole":"QA analyst","targetRole":"SRE"}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CareerProfile, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    #[schema(example = "QA analyst")]
    pub current_role: String,
    #[serde(default)]
    #[schema(example = "Site reliability engineer")]
    pub target_role: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub current_role: String,
    pub target_role: String,
}

impl From<UserProfile> for ProfileDto {
    fn from(value: UserProfile) -> Self {
        Self {
            current_role: value.profile.current_role,
            target_role: value.profile.target_role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: ProfileDto,
}

/// The saved profile; blank roles when nothing was stored yet.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Career profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let profile = state.profile_query.get(&user_id).await?;
    Ok(web::Json(ProfileResponse {
        profile: profile.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Saved profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "saveProfile"
)]
#[put("/profile")]
pub async fn save_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let profile = CareerProfile::new(payload.current_role, payload.target_role);
    let saved = state.profile.save(&user_id, profile).await?;
    Ok(web::Json(ProfileResponse {
        profile: saved.into(),
    }))
}
