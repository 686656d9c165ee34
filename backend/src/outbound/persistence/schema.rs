//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When the
//! migrations change, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// One row per user per calendar day.
    check_ins (id) {
        id -> Uuid,
        user_id -> Uuid,
        check_in_date -> Date,
        created_at -> Timestamptz,
        /// Self-reported mood, 1 through 10.
        mood -> Int2,
        content -> Text,
        challenges -> Text,
        ai_summary -> Nullable<Text>,
        /// JSON array of suggestion strings.
        ai_suggestions -> Nullable<Jsonb>,
        ai_mood_insight -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    user_stats (user_id) {
        user_id -> Uuid,
        current_streak -> Int4,
        longest_streak -> Int4,
        last_check_in -> Date,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    achievements (id) {
        id -> Uuid,
        user_id -> Uuid,
        achievement_key -> Text,
        title -> Text,
        description -> Text,
        unlocked_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only roadmap documents; the newest row per user is current.
    roadmaps (id) {
        id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
        roadmap_json -> Jsonb,
    }
}

diesel::table! {
    roadmap_progress (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// One of `skill`, `project`, `certification`, `timeline`.
        item_type -> Text,
        item_name -> Text,
        completed -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    daily_tasks (id) {
        id -> Uuid,
        user_id -> Uuid,
        task_text -> Text,
        task_date -> Date,
        done -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_profiles (user_id) {
        user_id -> Uuid,
        current_role -> Text,
        target_role -> Text,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    achievements,
    check_ins,
    daily_tasks,
    roadmap_progress,
    roadmaps,
    user_profiles,
    user_stats,
);
