//! PostgreSQL-backed `UserStatsRepository` implementation using Diesel ORM.
//!
//! Both writes are conditional. `insert_if_absent` relies on the primary key
//! with `ON CONFLICT DO NOTHING`; `compare_and_set` filters the update on the
//! previously read values and reports whether a row matched.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserStatsRepository, UserStatsRepositoryError};
use crate::domain::{CalendarDay, UserId, UserStats};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserStatsRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_stats;

/// Diesel-backed implementation of the user stats repository port.
#[derive(Clone)]
pub struct DieselUserStatsRepository {
    pool: DbPool,
}

impl DieselUserStatsRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserStatsRepositoryError {
    map_basic_pool_error(error, |message| UserStatsRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserStatsRepositoryError {
    map_basic_diesel_error(
        error,
        UserStatsRepositoryError::query,
        UserStatsRepositoryError::connection,
    )
}

fn to_column(value: u32, field: &str) -> Result<i32, UserStatsRepositoryError> {
    i32::try_from(value)
        .map_err(|_| UserStatsRepositoryError::query(format!("{field} exceeds column range")))
}

fn from_column(value: i32, field: &str) -> Result<u32, UserStatsRepositoryError> {
    u32::try_from(value)
        .map_err(|_| UserStatsRepositoryError::query(format!("stored {field} is negative")))
}

fn stats_to_row(stats: &UserStats) -> Result<UserStatsRow, UserStatsRepositoryError> {
    Ok(UserStatsRow {
        user_id: *stats.user_id.as_uuid(),
        current_streak: to_column(stats.current_streak, "current_streak")?,
        longest_streak: to_column(stats.longest_streak, "longest_streak")?,
        last_check_in: stats.last_check_in.date(),
    })
}

fn row_to_stats(row: UserStatsRow) -> Result<UserStats, UserStatsRepositoryError> {
    Ok(UserStats {
        user_id: UserId::from_uuid(row.user_id),
        current_streak: from_column(row.current_streak, "current_streak")?,
        longest_streak: from_column(row.longest_streak, "longest_streak")?,
        last_check_in: CalendarDay::new(row.last_check_in),
    })
}

#[async_trait]
impl UserStatsRepository for DieselUserStatsRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, UserStatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = user_stats::table
            .filter(user_stats::user_id.eq(user_id.as_uuid()))
            .select(UserStatsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stats).transpose()
    }

    async fn insert_if_absent(&self, stats: &UserStats) -> Result<bool, UserStatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = stats_to_row(stats)?;

        let inserted = diesel::insert_into(user_stats::table)
            .values(&row)
            .on_conflict(user_stats::user_id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted == 1)
    }

    async fn compare_and_set(
        &self,
        expected: &UserStats,
        next: &UserStats,
    ) -> Result<bool, UserStatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let old = stats_to_row(expected)?;
        let new = stats_to_row(next)?;

        let updated = diesel::update(
            user_stats::table.filter(
                user_stats::user_id
                    .eq(old.user_id)
                    .and(user_stats::current_streak.eq(old.current_streak))
                    .and(user_stats::longest_streak.eq(old.longest_streak))
                    .and(user_stats::last_check_in.eq(old.last_check_in)),
            ),
        )
        .set((
            user_stats::current_streak.eq(new.current_streak),
            user_stats::longest_streak.eq(new.longest_streak),
            user_stats::last_check_in.eq(new.last_check_in),
            user_stats::updated_at.eq(now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated == 1)
    }
}
