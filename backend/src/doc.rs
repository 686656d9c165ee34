//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler plus the health probes. The
//! error payload is described by [`ErrorSchema`] so the domain error stays
//! free of utoipa derives; handler DTOs are collected from the paths that
//! reference them.
//!
//! The document backs Swagger UI in debug builds and is printed by the
//! `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Careerlog API",
        description = "Daily check-ins with AI annotation, streaks, achievements, career roadmaps and daily tasks.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::check_ins::submit_check_in,
        crate::inbound::http::check_ins::list_check_ins,
        crate::inbound::http::check_ins::edit_check_in,
        crate::inbound::http::check_ins::annotate_check_in,
        crate::inbound::http::progress::update_streak,
        crate::inbound::http::progress::check_achievements,
        crate::inbound::http::progress::list_achievements,
        crate::inbound::http::progress::record_daily_progress,
        crate::inbound::http::roadmaps::generate_roadmap,
        crate::inbound::http::roadmaps::latest_roadmap,
        crate::inbound::http::roadmaps::next_steps,
        crate::inbound::http::roadmaps::toggle_progress,
        crate::inbound::http::insights::weekly_insights,
        crate::inbound::http::daily_tasks::list_daily_tasks,
        crate::inbound::http::daily_tasks::add_daily_task,
        crate::inbound::http::daily_tasks::set_daily_task_done,
        crate::inbound::http::daily_tasks::generate_daily_tasks,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::save_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "session", description = "Session login and logout"),
        (name = "check-ins", description = "Daily check-ins and their AI annotation"),
        (name = "progress", description = "Streaks, achievements and the daily pipeline"),
        (name = "roadmaps", description = "Career roadmaps and item progress"),
        (name = "insights", description = "Weekly AI insights"),
        (name = "daily-tasks", description = "Per-day task lists"),
        (name = "dashboard", description = "Aggregated landing view"),
        (name = "profile", description = "Current and target role"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        match schema {
            RefOr::T(Schema::Object(obj)) => {
                for field in ["code", "error", "traceId", "details"] {
                    assert!(
                        obj.properties.contains_key(field),
                        "schema should have field '{field}'"
                    );
                }
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/check-ins")]
    #[case("/api/v1/check-ins/{id}/annotation")]
    #[case("/api/v1/daily-progress")]
    #[case("/api/v1/roadmaps/progress")]
    #[case("/api/v1/insights/weekly")]
    #[case("/api/v1/daily-tasks/generate")]
    #[case("/api/v1/dashboard")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
