//! HTTP inbound adapter exposing REST endpoints.

pub mod check_ins;
pub mod daily_tasks;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod insights;
pub mod profile;
pub mod progress;
pub mod roadmaps;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on the given scope or app config.
///
/// Session middleware and shared state are supplied by the caller.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(check_ins::submit_check_in)
        .service(check_ins::list_check_ins)
        .service(check_ins::edit_check_in)
        .service(check_ins::annotate_check_in)
        .service(progress::update_streak)
        .service(progress::check_achievements)
        .service(progress::list_achievements)
        .service(progress::record_daily_progress)
        .service(roadmaps::generate_roadmap)
        .service(roadmaps::latest_roadmap)
        .service(roadmaps::next_steps)
        .service(roadmaps::toggle_progress)
        .service(insights::weekly_insights)
        .service(daily_tasks::generate_daily_tasks)
        .service(daily_tasks::list_daily_tasks)
        .service(daily_tasks::add_daily_task)
        .service(daily_tasks::set_daily_task_done)
        .service(dashboard::dashboard)
        .service(profile::get_profile)
        .service(profile::save_profile);
}
