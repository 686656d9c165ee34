//! Weekly insights service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{CheckInRepository, InsightsQuery, TextCompletion};
use crate::domain::{
    CalendarDay, Error, UserId, WeeklyInsights, parse_completion, weekly_insights_prompt,
};

/// Days before today included in the insights window.
const WINDOW_DAYS_BEFORE_TODAY: u64 = 6;

/// Computes [`WeeklyInsights`] on demand; nothing is persisted.
pub struct InsightsService<R> {
    check_ins: Arc<R>,
    completion: Arc<dyn TextCompletion>,
    clock: Arc<dyn Clock>,
}

impl<R> InsightsService<R> {
    pub fn new(
        check_ins: Arc<R>,
        completion: Arc<dyn TextCompletion>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            check_ins,
            completion,
            clock,
        }
    }
}

#[async_trait]
impl<R> InsightsQuery for InsightsService<R>
where
    R: CheckInRepository,
{
    async fn weekly(&self, user_id: &UserId) -> Result<Option<WeeklyInsights>, Error> {
        let today = CalendarDay::today(self.clock.as_ref());
        let from = today.minus_days(WINDOW_DAYS_BEFORE_TODAY);
        let check_ins = self.check_ins.list_between(user_id, from, today).await?;
        if check_ins.is_empty() {
            debug!(%user_id, %from, %today, "no check-ins in insights window");
            return Ok(None);
        }

        let raw = self
            .completion
            .complete(&weekly_insights_prompt(&check_ins))
            .await?;
        let insights = parse_completion::<WeeklyInsights>(&raw).map_err(|err| {
            warn!(%user_id, reason = %err.reason, "weekly insights completion unusable");
            Error::from(err)
        })?;
        Ok(Some(insights))
    }
}
