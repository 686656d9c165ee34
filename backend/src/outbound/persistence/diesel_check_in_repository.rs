//! PostgreSQL-backed `CheckInRepository` implementation using Diesel ORM.
//!
//! The one-check-in-per-day rule is enforced by the
//! `(user_id, check_in_date)` unique constraint; `upsert_for_day` relies on
//! `ON CONFLICT` so concurrent submissions for the same day collapse into a
//! single row.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CheckInRepository, CheckInRepositoryError};
use crate::domain::{
    CalendarDay, CheckIn, CheckInAnnotation, CheckInEntry, CheckInUpsert, Mood, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::json_serializers::{json_to_suggestions, suggestions_to_json};
use super::models::{CheckInAnnotationUpdate, CheckInEntryUpdate, CheckInRow, NewCheckInRow};
use super::pool::{DbPool, PoolError};
use super::schema::check_ins;

/// Diesel-backed implementation of the check-in repository port.
#[derive(Clone)]
pub struct DieselCheckInRepository {
    pool: DbPool,
}

impl DieselCheckInRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CheckInRepositoryError {
    map_basic_pool_error(error, |message| CheckInRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CheckInRepositoryError {
    map_basic_diesel_error(
        error,
        CheckInRepositoryError::query,
        CheckInRepositoryError::connection,
    )
}

fn entry_update(entry: &CheckInEntry) -> CheckInEntryUpdate<'_> {
    CheckInEntryUpdate {
        mood: i16::from(entry.mood.value()),
        content: &entry.content,
        challenges: &entry.challenges,
    }
}

/// Convert a database row into a validated domain check-in.
fn row_to_check_in(row: CheckInRow) -> Result<CheckIn, CheckInRepositoryError> {
    let CheckInRow {
        id,
        user_id,
        check_in_date,
        created_at,
        mood,
        content,
        challenges,
        ai_summary,
        ai_suggestions,
        ai_mood_insight,
    } = row;

    let mood = Mood::new(i64::from(mood))
        .map_err(|err| CheckInRepositoryError::query(format!("stored mood: {err}")))?;
    let annotation = match ai_summary {
        Some(summary) => Some(CheckInAnnotation {
            summary,
            suggestions: ai_suggestions
                .map(json_to_suggestions)
                .transpose()
                .map_err(CheckInRepositoryError::query)?
                .unwrap_or_default(),
            mood_insight: ai_mood_insight,
        }),
        None => None,
    };

    Ok(CheckIn {
        id,
        user_id: UserId::from_uuid(user_id),
        check_in_date: CalendarDay::new(check_in_date),
        created_at,
        entry: CheckInEntry {
            mood,
            content,
            challenges,
        },
        annotation,
    })
}

fn rows_to_check_ins(rows: Vec<CheckInRow>) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
    rows.into_iter().map(row_to_check_in).collect()
}

#[async_trait]
impl CheckInRepository for DieselCheckInRepository {
    async fn upsert_for_day(&self, upsert: &CheckInUpsert) -> Result<CheckIn, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCheckInRow {
            id: Uuid::new_v4(),
            user_id: *upsert.user_id.as_uuid(),
            check_in_date: upsert.check_in_date.date(),
            created_at: upsert.created_at,
            mood: i16::from(upsert.entry.mood.value()),
            content: &upsert.entry.content,
            challenges: &upsert.entry.challenges,
        };

        let row = diesel::insert_into(check_ins::table)
            .values(&new_row)
            .on_conflict((check_ins::user_id, check_ins::check_in_date))
            .do_update()
            .set((
                check_ins::mood.eq(excluded(check_ins::mood)),
                check_ins::content.eq(excluded(check_ins::content)),
                check_ins::challenges.eq(excluded(check_ins::challenges)),
                check_ins::updated_at.eq(now),
            ))
            .returning(CheckInRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_check_in(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = check_ins::table
            .filter(check_ins::id.eq(id))
            .select(CheckInRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_check_in).transpose()
    }

    async fn update_entry(
        &self,
        id: Uuid,
        entry: &CheckInEntry,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(check_ins::table.filter(check_ins::id.eq(id)))
            .set((entry_update(entry), check_ins::updated_at.eq(now)))
            .returning(CheckInRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_check_in).transpose()
    }

    async fn set_annotation(
        &self,
        id: Uuid,
        annotation: &CheckInAnnotation,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let suggestions = suggestions_to_json(&annotation.suggestions);
        let changes = CheckInAnnotationUpdate {
            ai_summary: Some(&annotation.summary),
            ai_suggestions: Some(&suggestions),
            ai_mood_insight: annotation.mood_insight.as_deref(),
        };

        let row = diesel::update(check_ins::table.filter(check_ins::id.eq(id)))
            .set((changes, check_ins::updated_at.eq(now)))
            .returning(CheckInRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_check_in).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = check_ins::table
            .filter(check_ins::user_id.eq(user_id.as_uuid()))
            .order(check_ins::check_in_date.asc())
            .select(CheckInRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_check_ins(rows)
    }

    async fn list_between(
        &self,
        user_id: &UserId,
        from: CalendarDay,
        to: CalendarDay,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = check_ins::table
            .filter(
                check_ins::user_id
                    .eq(user_id.as_uuid())
                    .and(check_ins::check_in_date.between(from.date(), to.date())),
            )
            .order(check_ins::check_in_date.asc())
            .select(CheckInRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_check_ins(rows)
    }

    async fn latest_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = check_ins::table
            .filter(check_ins::user_id.eq(user_id.as_uuid()))
            .order(check_ins::check_in_date.desc())
            .select(CheckInRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_check_in).transpose()
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, CheckInRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = check_ins::table
            .filter(check_ins::user_id.eq(user_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn row() -> CheckInRow {
        CheckInRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            check_in_date: NaiveDate::from_ymd_opt(2026, 5, 4).expect("valid date"),
            created_at: Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap(),
            mood: 7,
            content: "Paired on the billing bug".into(),
            challenges: String::new(),
            ai_summary: None,
            ai_suggestions: None,
            ai_mood_insight: None,
        }
    }

    #[rstest]
    fn unannotated_row_has_no_annotation() {
        let check_in = row_to_check_in(row()).expect("valid row");

        assert!(check_in.annotation.is_none());
        assert_eq!(check_in.entry.mood.value(), 7);
        assert_eq!(check_in.check_in_date.to_string(), "2026-05-04");
    }

    #[rstest]
    fn annotated_row_decodes_suggestions() {
        let check_in = row_to_check_in(CheckInRow {
            ai_summary: Some("Solid progress".into()),
            ai_suggestions: Some(json!(["Write tests", "Rest"])),
            ..row()
        })
        .expect("valid row");

        let annotation = check_in.annotation.expect("annotated");
        assert_eq!(annotation.suggestions, ["Write tests", "Rest"]);
        assert!(annotation.mood_insight.is_none());
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    fn out_of_range_mood_is_a_query_error(#[case] mood: i16) {
        let err = row_to_check_in(CheckInRow { mood, ..row() }).expect_err("invalid mood");

        assert!(matches!(err, CheckInRepositoryError::Query { .. }));
    }
}
