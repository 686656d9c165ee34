//! PostgreSQL-backed `DailyTaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DailyTaskRepository, DailyTaskRepositoryError};
use crate::domain::{CalendarDay, DailyTask, NewDailyTask, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::DailyTaskRow;
use super::pool::{DbPool, PoolError};
use super::schema::daily_tasks;

/// Diesel-backed implementation of the daily task repository port.
#[derive(Clone)]
pub struct DieselDailyTaskRepository {
    pool: DbPool,
}

impl DieselDailyTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DailyTaskRepositoryError {
    map_basic_pool_error(error, |message| DailyTaskRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> DailyTaskRepositoryError {
    map_basic_diesel_error(
        error,
        DailyTaskRepositoryError::query,
        DailyTaskRepositoryError::connection,
    )
}

impl From<DailyTaskRow> for DailyTask {
    fn from(row: DailyTaskRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            task_text: row.task_text,
            task_date: CalendarDay::new(row.task_date),
            done: row.done,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DailyTaskRepository for DieselDailyTaskRepository {
    async fn list_for_day(
        &self,
        user_id: &UserId,
        day: CalendarDay,
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DailyTaskRow> = daily_tasks::table
            .filter(
                daily_tasks::user_id
                    .eq(user_id.as_uuid())
                    .and(daily_tasks::task_date.eq(day.date())),
            )
            .order((daily_tasks::created_at.asc(), daily_tasks::id.asc()))
            .select(DailyTaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(DailyTask::from).collect())
    }

    async fn insert_many(
        &self,
        tasks: &[NewDailyTask],
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Generated batches share one timestamp, so offset each row by a
        // microsecond to keep creation order stable when listed.
        let rows: Vec<DailyTaskRow> = tasks
            .iter()
            .zip(0_i64..)
            .map(|(task, offset)| DailyTaskRow {
                id: Uuid::new_v4(),
                user_id: *task.user_id.as_uuid(),
                task_text: task.task_text.as_str().to_owned(),
                task_date: task.task_date.date(),
                done: false,
                created_at: task.created_at + chrono::Duration::microseconds(offset),
            })
            .collect();

        let stored: Vec<DailyTaskRow> = diesel::insert_into(daily_tasks::table)
            .values(&rows)
            .returning(DailyTaskRow::as_returning())
            .get_results(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into_iter().map(DailyTask::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DailyTask>, DailyTaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = daily_tasks::table
            .filter(daily_tasks::id.eq(id))
            .select(DailyTaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(DailyTask::from))
    }

    async fn set_done(
        &self,
        id: Uuid,
        done: bool,
    ) -> Result<Option<DailyTask>, DailyTaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(daily_tasks::table.filter(daily_tasks::id.eq(id)))
            .set(daily_tasks::done.eq(done))
            .returning(DailyTaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(DailyTask::from))
    }
}
