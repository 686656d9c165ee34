//! Port for check-in persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CalendarDay, CheckIn, CheckInAnnotation, CheckInEntry, CheckInUpsert, Error, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by check-in repository adapters.
    pub enum CheckInRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "check-in repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "check-in repository query failed: {message}",
    }
}

impl From<CheckInRepositoryError> for Error {
    fn from(value: CheckInRepositoryError) -> Self {
        Error::upstream(value.to_string())
    }
}

/// Port for reading and writing check-ins.
///
/// Adapters must enforce one row per `(user_id, check_in_date)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Insert the day's check-in or overwrite its entry fields atomically.
    ///
    /// On conflict the stored `id`, `created_at` and annotation are kept.
    async fn upsert_for_day(&self, upsert: &CheckInUpsert) -> Result<CheckIn, CheckInRepositoryError>;

    /// Find a check-in by id regardless of owner.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CheckIn>, CheckInRepositoryError>;

    /// Replace the entry fields of an existing check-in.
    async fn update_entry(
        &self,
        id: Uuid,
        entry: &CheckInEntry,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError>;

    /// Store AI annotation fields on an existing check-in.
    async fn set_annotation(
        &self,
        id: Uuid,
        annotation: &CheckInAnnotation,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError>;

    /// All check-ins for a user, oldest day first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CheckIn>, CheckInRepositoryError>;

    /// Check-ins whose day lies in `[from, to]`, oldest first.
    async fn list_between(
        &self,
        user_id: &UserId,
        from: CalendarDay,
        to: CalendarDay,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError>;

    /// The check-in with the most recent day.
    async fn latest_for_user(&self, user_id: &UserId)
    -> Result<Option<CheckIn>, CheckInRepositoryError>;

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, CheckInRepositoryError>;
}
