//! Driving port for weekly insights.

use async_trait::async_trait;

use crate::domain::{Error, UserId, WeeklyInsights};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsightsQuery: Send + Sync {
    /// Insights over the last seven UTC days including today, or `None` when
    /// there are no check-ins in that window.
    async fn weekly(&self, user_id: &UserId) -> Result<Option<WeeklyInsights>, Error>;
}
