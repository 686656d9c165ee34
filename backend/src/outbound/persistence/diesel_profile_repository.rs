//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{CareerProfile, UserId, UserProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserProfileRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_profiles;

/// Diesel-backed implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, |message| ProfileRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            profile: CareerProfile {
                current_role: row.current_role,
                target_role: row.target_role,
            },
        }
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.as_uuid()))
            .select(UserProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(UserProfile::from))
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = UserProfileRow {
            user_id: *profile.user_id.as_uuid(),
            current_role: profile.profile.current_role.clone(),
            target_role: profile.profile.target_role.clone(),
        };

        let stored = diesel::insert_into(user_profiles::table)
            .values(&row)
            .on_conflict(user_profiles::user_id)
            .do_update()
            .set((
                user_profiles::current_role.eq(excluded(user_profiles::current_role)),
                user_profiles::target_role.eq(excluded(user_profiles::target_role)),
                user_profiles::updated_at.eq(now),
            ))
            .returning(UserProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UserProfile::from(stored))
    }
}
