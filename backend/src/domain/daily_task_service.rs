//! Daily task service.
//!
//! Manual tasks are added one at a time; generated tasks are requested from
//! the completion service using the latest check-in, the newest roadmap and
//! yesterday's task texts, then stored in the order the model listed them.
//! Anything past the first [`MAX_GENERATED_TASKS`] usable entries is dropped.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::ports::{
    CheckInRepository, DailyTaskCommand, DailyTaskQuery, DailyTaskRepository, RoadmapRepository,
    TextCompletion,
};
use crate::domain::{
    CalendarDay, DailyTask, Error, NewDailyTask, TaskText, TodayTasksPayload, UserId,
    parse_completion, today_tasks_prompt,
};

/// Upper bound on tasks kept from one generation request.
pub const MAX_GENERATED_TASKS: usize = 6;

/// Repositories the daily task service reads and writes.
pub struct DailyTaskRepositories<T, C, R> {
    pub tasks: Arc<T>,
    pub check_ins: Arc<C>,
    pub roadmaps: Arc<R>,
}

/// Service implementing [`DailyTaskCommand`] and [`DailyTaskQuery`].
pub struct DailyTaskService<T, C, R> {
    repos: DailyTaskRepositories<T, C, R>,
    completion: Arc<dyn TextCompletion>,
    clock: Arc<dyn Clock>,
}

impl<T, C, R> DailyTaskService<T, C, R> {
    pub fn new(
        repos: DailyTaskRepositories<T, C, R>,
        completion: Arc<dyn TextCompletion>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            completion,
            clock,
        }
    }
}

impl<T, C, R> DailyTaskService<T, C, R>
where
    T: DailyTaskRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn yesterday_texts(&self, user_id: &UserId, today: CalendarDay) -> Result<Vec<String>, Error> {
        let Some(yesterday) = today.previous() else {
            return Ok(Vec::new());
        };
        Ok(self
            .repos
            .tasks
            .list_for_day(user_id, yesterday)
            .await?
            .into_iter()
            .map(|task| task.task_text)
            .collect())
    }
}

#[async_trait]
impl<T, C, R> DailyTaskCommand for DailyTaskService<T, C, R>
where
    T: DailyTaskRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn add(&self, user_id: &UserId, day: CalendarDay, text: TaskText) -> Result<DailyTask, Error> {
        let task = NewDailyTask {
            user_id: *user_id,
            task_text: text,
            task_date: day,
            created_at: self.clock.utc(),
        };
        let mut stored = self.repos.tasks.insert_many(std::slice::from_ref(&task)).await?;
        let row = stored
            .pop()
            .ok_or_else(|| Error::internal("task insert returned no row"))?;
        info!(%user_id, task_id = %row.id, %day, "daily task added");
        Ok(row)
    }

    async fn set_done(&self, user_id: &UserId, id: Uuid, done: bool) -> Result<DailyTask, Error> {
        let existing = self
            .repos
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("task not found"))?;
        if !existing.is_owned_by(user_id) {
            warn!(%user_id, task_id = %id, "rejected access to another user's task");
            return Err(Error::forbidden("task belongs to another user"));
        }
        self.repos
            .tasks
            .set_done(id, done)
            .await?
            .ok_or_else(|| Error::not_found("task not found"))
    }

    async fn generate_today(&self, user_id: &UserId) -> Result<Vec<DailyTask>, Error> {
        let now = self.clock.utc();
        let today = CalendarDay::containing(now);
        let latest = self.repos.check_ins.latest_for_user(user_id).await?;
        let roadmap = self.repos.roadmaps.latest_for_user(user_id).await?;
        let yesterday = self.yesterday_texts(user_id, today).await?;

        let prompt = today_tasks_prompt(
            latest.as_ref(),
            roadmap.as_ref().map(|roadmap| &roadmap.document),
            &yesterday,
        );
        let raw = self.completion.complete(&prompt).await?;
        let payload = parse_completion::<TodayTasksPayload>(&raw).map_err(|err| {
            warn!(%user_id, reason = %err.reason, "task completion unusable");
            Error::from(err)
        })?;

        let tasks = payload
            .into_tasks()
            .into_iter()
            .filter_map(|text| TaskText::new(text).ok())
            .take(MAX_GENERATED_TASKS)
            .map(|task_text| NewDailyTask {
                user_id: *user_id,
                task_text,
                task_date: today,
                created_at: now,
            })
            .collect::<Vec<_>>();
        let stored = self.repos.tasks.insert_many(&tasks).await?;
        info!(%user_id, count = stored.len(), "daily tasks generated");
        Ok(stored)
    }
}

#[async_trait]
impl<T, C, R> DailyTaskQuery for DailyTaskService<T, C, R>
where
    T: DailyTaskRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn list(&self, user_id: &UserId, day: Option<CalendarDay>) -> Result<Vec<DailyTask>, Error> {
        let day = day.unwrap_or_else(|| CalendarDay::today(self.clock.as_ref()));
        Ok(self.repos.tasks.list_for_day(user_id, day).await?)
    }
}

#[cfg(test)]
#[path = "daily_task_service_tests.rs"]
mod tests;
