//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. `updated_at` columns are maintained by the
//! database defaults and by explicit `now` assignments in upserts, so the row
//! structs leave them out.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    achievements, check_ins, daily_tasks, roadmap_progress, roadmaps, user_profiles, user_stats,
};

// ---------------------------------------------------------------------------
// Check-ins
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = check_ins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CheckInRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub mood: i16,
    pub content: String,
    pub challenges: String,
    pub ai_summary: Option<String>,
    pub ai_suggestions: Option<serde_json::Value>,
    pub ai_mood_insight: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = check_ins)]
pub(crate) struct NewCheckInRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub mood: i16,
    pub content: &'a str,
    pub challenges: &'a str,
}

/// Entry fields replaced by an upsert or an edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = check_ins)]
pub(crate) struct CheckInEntryUpdate<'a> {
    pub mood: i16,
    pub content: &'a str,
    pub challenges: &'a str,
}

/// Annotation fields written after the completion service answers.
///
/// `treat_none_as_null` lets a missing mood insight clear a stale one.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = check_ins)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CheckInAnnotationUpdate<'a> {
    pub ai_summary: Option<&'a str>,
    pub ai_suggestions: Option<&'a serde_json::Value>,
    pub ai_mood_insight: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Streak stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserStatsRow {
    pub user_id: Uuid,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_check_in: NaiveDate,
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = achievements)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub achievement_key: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Roadmaps and progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = roadmaps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoadmapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub roadmap_json: serde_json::Value,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roadmap_progress)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoadmapProgressRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_type: String,
    pub item_name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roadmap_progress)]
pub(crate) struct NewRoadmapProgressRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_type: &'a str,
    pub item_name: &'a str,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Daily tasks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = daily_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DailyTaskRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub task_text: String,
    pub task_date: NaiveDate,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Career profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub user_id: Uuid,
    pub current_role: String,
    pub target_role: String,
}
