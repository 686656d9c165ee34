//! Driving ports for daily tasks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CalendarDay, DailyTask, Error, TaskText, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyTaskCommand: Send + Sync {
    async fn add(&self, user_id: &UserId, day: CalendarDay, text: TaskText)
    -> Result<DailyTask, Error>;

    async fn set_done(&self, user_id: &UserId, id: Uuid, done: bool) -> Result<DailyTask, Error>;

    /// Generate today's tasks from the latest check-in, the roadmap and
    /// yesterday's tasks.
    async fn generate_today(&self, user_id: &UserId) -> Result<Vec<DailyTask>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyTaskQuery: Send + Sync {
    /// Tasks for `day`, or for today when `None`.
    async fn list(&self, user_id: &UserId, day: Option<CalendarDay>)
    -> Result<Vec<DailyTask>, Error>;
}
