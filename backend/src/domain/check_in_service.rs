//! Check-in domain service.
//!
//! Implements check-in upsert, edits, history and the AI annotation stage.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    CheckInCommand, CheckInQuery, CheckInRepository, SubmitCheckIn, TextCompletion,
};
use crate::domain::{
    AnnotationPayload, CalendarDay, CheckIn, CheckInAnnotation, CheckInEdit, CheckInUpsert, Error,
    UserId, annotation_prompt, parse_completion,
};

/// Check-in service implementing [`CheckInCommand`] and [`CheckInQuery`].
#[derive(Clone)]
pub struct CheckInService<R> {
    repo: Arc<R>,
    completion: Arc<dyn TextCompletion>,
    clock: Arc<dyn Clock>,
}

impl<R> CheckInService<R> {
    pub fn new(repo: Arc<R>, completion: Arc<dyn TextCompletion>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            completion,
            clock,
        }
    }
}

impl<R> CheckInService<R>
where
    R: CheckInRepository,
{
    async fn owned_check_in(&self, user_id: &UserId, id: Uuid) -> Result<CheckIn, Error> {
        let check_in = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("check-in not found"))?;
        if !check_in.is_owned_by(user_id) {
            warn!(%user_id, check_in_id = %id, "rejected access to another user's check-in");
            return Err(Error::forbidden("check-in belongs to another user"));
        }
        Ok(check_in)
    }
}

#[async_trait]
impl<R> CheckInCommand for CheckInService<R>
where
    R: CheckInRepository,
{
    async fn submit(&self, user_id: &UserId, submission: SubmitCheckIn) -> Result<CheckIn, Error> {
        let now = self.clock.utc();
        let today = CalendarDay::containing(now);
        let day = submission.date.unwrap_or(today);
        if day > today {
            return Err(Error::invalid_request("check-in date must not be in the future"));
        }
        let created_at = if day == today { now } else { day.start() };

        let check_in = self
            .repo
            .upsert_for_day(&CheckInUpsert {
                user_id: *user_id,
                check_in_date: day,
                created_at,
                entry: submission.entry,
            })
            .await?;
        info!(%user_id, check_in_id = %check_in.id, %day, "check-in saved");
        Ok(check_in)
    }

    async fn edit(&self, user_id: &UserId, id: Uuid, edit: CheckInEdit) -> Result<CheckIn, Error> {
        if edit.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }
        let existing = self.owned_check_in(user_id, id).await?;
        let entry = edit.apply_to(&existing.entry);
        self.repo
            .update_entry(id, &entry)
            .await?
            .ok_or_else(|| Error::not_found("check-in not found"))
    }

    async fn annotate(&self, user_id: &UserId, id: Uuid) -> Result<AnnotationPayload, Error> {
        let check_in = self.owned_check_in(user_id, id).await?;
        let raw = self
            .completion
            .complete(&annotation_prompt(&check_in.entry))
            .await?;
        let payload: AnnotationPayload = parse_completion(&raw).map_err(|err| {
            warn!(check_in_id = %id, reason = %err.reason, "annotation completion unusable");
            Error::from(err)
        })?;

        let annotation = CheckInAnnotation {
            summary: payload.summary.clone(),
            suggestions: payload.suggestions.clone(),
            mood_insight: payload.mood_insight.clone(),
        };
        self.repo
            .set_annotation(id, &annotation)
            .await?
            .ok_or_else(|| Error::not_found("check-in not found"))?;
        info!(check_in_id = %id, "check-in annotated");
        Ok(payload)
    }
}

#[async_trait]
impl<R> CheckInQuery for CheckInService<R>
where
    R: CheckInRepository,
{
    async fn history(&self, user_id: &UserId) -> Result<Vec<CheckIn>, Error> {
        Ok(self.repo.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
#[path = "check_in_service_tests.rs"]
mod tests;
