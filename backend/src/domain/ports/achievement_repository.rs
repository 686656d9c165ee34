//! Port for unlocked achievements.

use async_trait::async_trait;

use crate::domain::{Achievement, Error, NewAchievement, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by achievement repository adapters.
    pub enum AchievementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "achievement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "achievement repository query failed: {message}",
    }
}

impl From<AchievementRepositoryError> for Error {
    fn from(value: AchievementRepositoryError) -> Self {
        Error::upstream(value.to_string())
    }
}

/// Port for achievement rows, unique per `(user_id, achievement_key)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Unlocked achievements, newest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError>;

    /// Insert unless the key is already unlocked for the user.
    ///
    /// Returns the new row, or `None` when another writer got there first.
    async fn insert_if_absent(
        &self,
        achievement: &NewAchievement,
    ) -> Result<Option<Achievement>, AchievementRepositoryError>;
}
