//! Port for per-user streak counters.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserStats};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user stats repository adapters.
    pub enum UserStatsRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user stats repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user stats repository query failed: {message}",
    }
}

impl From<UserStatsRepositoryError> for Error {
    fn from(value: UserStatsRepositoryError) -> Self {
        Error::upstream(value.to_string())
    }
}

/// Port for the single stats row each user owns.
///
/// Writes are conditional so concurrent updates cannot silently overwrite
/// each other: the caller re-reads and retries when a write reports `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStatsRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, UserStatsRepositoryError>;

    /// Create the row unless one exists. Returns whether this call inserted it.
    async fn insert_if_absent(&self, stats: &UserStats) -> Result<bool, UserStatsRepositoryError>;

    /// Replace `expected` with `next` only if the stored row still equals
    /// `expected`. Returns whether the write happened.
    async fn compare_and_set(
        &self,
        expected: &UserStats,
        next: &UserStats,
    ) -> Result<bool, UserStatsRepositoryError>;
}
