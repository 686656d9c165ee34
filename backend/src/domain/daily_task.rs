//! Daily to-do items.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CalendarDay, UserId};

const ROADMAP_KEYWORDS: [&str; 4] = ["learn", "build", "project", "skill"];

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DailyTaskValidationError {
    #[error("task text must not be empty")]
    EmptyText,
}

/// Trimmed, non-empty task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DailyTaskValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DailyTaskValidationError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A stored task for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTask {
    pub id: Uuid,
    pub user_id: UserId,
    pub task_text: String,
    pub task_date: CalendarDay,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl DailyTask {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Whether the task looks like it advances the roadmap.
    ///
    /// # Examples
    /// ```
    /// # use backend::domain::is_roadmap_related;
    /// assert!(is_roadmap_related("Build the CLI prototype"));
    /// assert!(!is_roadmap_related("Call the dentist"));
    /// ```
    pub fn is_roadmap_related(&self) -> bool {
        is_roadmap_related(&self.task_text)
    }
}

/// Case-insensitive keyword match used to label roadmap work.
pub fn is_roadmap_related(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ROADMAP_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// A task ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDailyTask {
    pub user_id: UserId,
    pub task_text: TaskText,
    pub task_date: CalendarDay,
    pub created_at: DateTime<Utc>,
}
