//! Driving ports for streaks and achievements.

use async_trait::async_trait;

use crate::domain::{Achievement, Error, StreakTransition, UserId, UserStats};

/// Result of one streak update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub stats: UserStats,
    pub transition: StreakTransition,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressCommand: Send + Sync {
    /// Count today towards the user's streak. Repeat calls on one day are no-ops.
    async fn update_streak(&self, user_id: &UserId) -> Result<StreakUpdate, Error>;

    /// Award every newly qualifying achievement and return only those.
    async fn check_achievements(&self, user_id: &UserId) -> Result<Vec<Achievement>, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementsQuery: Send + Sync {
    /// Unlocked achievements, newest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Achievement>, Error>;
}
