//! PostgreSQL-backed roadmap and roadmap progress repositories.
//!
//! Roadmaps are append-only JSONB documents. Progress rows are keyed on
//! `(user_id, item_type, item_name)` and toggled in a single upsert so two
//! concurrent toggles cannot both read the same old value.

use async_trait::async_trait;
use diesel::dsl::{not, now};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    NewRoadmap, RoadmapProgressRepository, RoadmapRepository, RoadmapRepositoryError,
};
use crate::domain::{Roadmap, RoadmapItemType, RoadmapProgress, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::json_serializers::{json_to_roadmap_document, roadmap_document_to_json};
use super::models::{NewRoadmapProgressRow, RoadmapProgressRow, RoadmapRow};
use super::pool::{DbPool, PoolError};
use super::schema::{roadmap_progress, roadmaps};

/// Diesel-backed implementation of the roadmap repository port.
#[derive(Clone)]
pub struct DieselRoadmapRepository {
    pool: DbPool,
}

impl DieselRoadmapRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Diesel-backed implementation of the roadmap progress repository port.
#[derive(Clone)]
pub struct DieselRoadmapProgressRepository {
    pool: DbPool,
}

impl DieselRoadmapProgressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoadmapRepositoryError {
    map_basic_pool_error(error, |message| RoadmapRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> RoadmapRepositoryError {
    map_basic_diesel_error(
        error,
        RoadmapRepositoryError::query,
        RoadmapRepositoryError::connection,
    )
}

fn row_to_roadmap(row: RoadmapRow) -> Result<Roadmap, RoadmapRepositoryError> {
    let document = json_to_roadmap_document(row.roadmap_json).map_err(RoadmapRepositoryError::decode)?;
    Ok(Roadmap {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        document,
    })
}

fn row_to_progress(row: RoadmapProgressRow) -> Result<RoadmapProgress, RoadmapRepositoryError> {
    let item_type = row
        .item_type
        .parse::<RoadmapItemType>()
        .map_err(|err| RoadmapRepositoryError::decode(format!("item type {}", err.0)))?;
    Ok(RoadmapProgress {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        item_type,
        item_name: row.item_name,
        completed: row.completed,
    })
}

#[async_trait]
impl RoadmapRepository for DieselRoadmapRepository {
    async fn insert(&self, roadmap: &NewRoadmap) -> Result<Roadmap, RoadmapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let roadmap_json =
            roadmap_document_to_json(&roadmap.document).map_err(RoadmapRepositoryError::query)?;
        let row = RoadmapRow {
            id: Uuid::new_v4(),
            user_id: *roadmap.user_id.as_uuid(),
            created_at: roadmap.created_at,
            roadmap_json,
        };

        let stored = diesel::insert_into(roadmaps::table)
            .values(&row)
            .returning(RoadmapRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_roadmap(stored)
    }

    async fn latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Roadmap>, RoadmapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = roadmaps::table
            .filter(roadmaps::user_id.eq(user_id.as_uuid()))
            .order((roadmaps::created_at.desc(), roadmaps::id.desc()))
            .select(RoadmapRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_roadmap).transpose()
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, RoadmapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = roadmaps::table
            .filter(roadmaps::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[async_trait]
impl RoadmapProgressRepository for DieselRoadmapProgressRepository {
    async fn toggle(
        &self,
        user_id: &UserId,
        item_type: RoadmapItemType,
        item_name: &str,
    ) -> Result<RoadmapProgress, RoadmapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRoadmapProgressRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            item_type: item_type.as_str(),
            item_name,
            completed: true,
        };

        let row = diesel::insert_into(roadmap_progress::table)
            .values(&new_row)
            .on_conflict((
                roadmap_progress::user_id,
                roadmap_progress::item_type,
                roadmap_progress::item_name,
            ))
            .do_update()
            .set((
                roadmap_progress::completed.eq(not(roadmap_progress::completed)),
                roadmap_progress::updated_at.eq(now),
            ))
            .returning(RoadmapProgressRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_progress(row)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RoadmapProgress>, RoadmapRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RoadmapProgressRow> = roadmap_progress::table
            .filter(roadmap_progress::user_id.eq(user_id.as_uuid()))
            .order((roadmap_progress::item_type.asc(), roadmap_progress::item_name.asc()))
            .select(RoadmapProgressRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_progress).collect()
    }
}
