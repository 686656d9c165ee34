//! PostgreSQL-backed `AchievementRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AchievementRepository, AchievementRepositoryError};
use crate::domain::{Achievement, NewAchievement, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::AchievementRow;
use super::pool::{DbPool, PoolError};
use super::schema::achievements;

/// Diesel-backed implementation of the achievement repository port.
#[derive(Clone)]
pub struct DieselAchievementRepository {
    pool: DbPool,
}

impl DieselAchievementRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AchievementRepositoryError {
    map_basic_pool_error(error, |message| AchievementRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> AchievementRepositoryError {
    map_basic_diesel_error(
        error,
        AchievementRepositoryError::query,
        AchievementRepositoryError::connection,
    )
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            achievement_key: row.achievement_key,
            title: row.title,
            description: row.description,
            unlocked_at: row.unlocked_at,
        }
    }
}

#[async_trait]
impl AchievementRepository for DieselAchievementRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AchievementRow> = achievements::table
            .filter(achievements::user_id.eq(user_id.as_uuid()))
            .order((achievements::unlocked_at.desc(), achievements::id.desc()))
            .select(AchievementRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Achievement::from).collect())
    }

    async fn insert_if_absent(
        &self,
        achievement: &NewAchievement,
    ) -> Result<Option<Achievement>, AchievementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = AchievementRow {
            id: Uuid::new_v4(),
            user_id: *achievement.user_id.as_uuid(),
            achievement_key: achievement.achievement_key.clone(),
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            unlocked_at: achievement.unlocked_at,
        };

        // DO NOTHING returns no row on conflict, which `optional` maps to None.
        let inserted = diesel::insert_into(achievements::table)
            .values(&row)
            .on_conflict((achievements::user_id, achievements::achievement_key))
            .do_nothing()
            .returning(AchievementRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(inserted.map(Achievement::from))
    }
}
