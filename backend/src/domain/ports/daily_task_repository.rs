//! Port for daily tasks.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CalendarDay, DailyTask, Error, NewDailyTask, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by daily task repository adapters.
    pub enum DailyTaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "daily task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "daily task repository query failed: {message}",
    }
}

impl From<DailyTaskRepositoryError> for Error {
    fn from(value: DailyTaskRepositoryError) -> Self {
        Error::upstream(value.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyTaskRepository: Send + Sync {
    /// Tasks for one day in creation order.
    async fn list_for_day(
        &self,
        user_id: &UserId,
        day: CalendarDay,
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError>;

    /// Insert tasks in order and return the stored rows.
    async fn insert_many(
        &self,
        tasks: &[NewDailyTask],
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DailyTask>, DailyTaskRepositoryError>;

    async fn set_done(&self, id: Uuid, done: bool)
    -> Result<Option<DailyTask>, DailyTaskRepositoryError>;
}
