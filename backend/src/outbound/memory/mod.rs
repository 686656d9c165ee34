//! In-process store implementing every repository port.
//!
//! Used when no database is configured and by the end-to-end tests. It
//! enforces the same uniqueness keys as the PostgreSQL schema:
//! `(user_id, check_in_date)` for check-ins, `user_id` for stats and
//! profiles, `(user_id, achievement_key)` for achievements and
//! `(user_id, item_type, item_name)` for roadmap progress. Every operation
//! runs under one lock, so conditional writes are atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AchievementRepository, AchievementRepositoryError, CheckInRepository, CheckInRepositoryError,
    DailyTaskRepository, DailyTaskRepositoryError, NewRoadmap, ProfileRepository,
    ProfileRepositoryError, RoadmapProgressRepository, RoadmapRepository, RoadmapRepositoryError,
    UserStatsRepository, UserStatsRepositoryError,
};
use crate::domain::{
    Achievement, CalendarDay, CheckIn, CheckInAnnotation, CheckInEntry, CheckInUpsert, DailyTask,
    NewAchievement, NewDailyTask, Roadmap, RoadmapItemType, RoadmapProgress, UserId, UserProfile,
    UserStats,
};

#[derive(Debug, Default)]
struct MemoryState {
    check_ins: HashMap<Uuid, CheckIn>,
    check_in_days: HashMap<(UserId, CalendarDay), Uuid>,
    stats: HashMap<UserId, UserStats>,
    achievements: Vec<Achievement>,
    roadmaps: Vec<Roadmap>,
    progress: HashMap<(UserId, RoadmapItemType, String), RoadmapProgress>,
    tasks: Vec<DailyTask>,
    profiles: HashMap<UserId, UserProfile>,
}

/// Thread-safe in-memory implementation of the repository ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[async_trait]
impl CheckInRepository for MemoryStore {
    async fn upsert_for_day(&self, upsert: &CheckInUpsert) -> Result<CheckIn, CheckInRepositoryError> {
        let mut state = self.lock();
        let key = (upsert.user_id, upsert.check_in_date);
        if let Some(id) = state.check_in_days.get(&key).copied() {
            let row = state
                .check_ins
                .get_mut(&id)
                .ok_or_else(|| CheckInRepositoryError::query("day index points at a missing row"))?;
            row.entry = upsert.entry.clone();
            return Ok(row.clone());
        }

        let row = CheckIn {
            id: Uuid::new_v4(),
            user_id: upsert.user_id,
            check_in_date: upsert.check_in_date,
            created_at: upsert.created_at,
            entry: upsert.entry.clone(),
            annotation: None,
        };
        state.check_in_days.insert(key, row.id);
        state.check_ins.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        Ok(self.lock().check_ins.get(&id).cloned())
    }

    async fn update_entry(
        &self,
        id: Uuid,
        entry: &CheckInEntry,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        Ok(self.lock().check_ins.get_mut(&id).map(|row| {
            row.entry = entry.clone();
            row.clone()
        }))
    }

    async fn set_annotation(
        &self,
        id: Uuid,
        annotation: &CheckInAnnotation,
    ) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        Ok(self.lock().check_ins.get_mut(&id).map(|row| {
            row.annotation = Some(annotation.clone());
            row.clone()
        }))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut rows: Vec<CheckIn> = self
            .lock()
            .check_ins
            .values()
            .filter(|row| row.is_owned_by(user_id))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.check_in_date);
        Ok(rows)
    }

    async fn list_between(
        &self,
        user_id: &UserId,
        from: CalendarDay,
        to: CalendarDay,
    ) -> Result<Vec<CheckIn>, CheckInRepositoryError> {
        let mut rows = CheckInRepository::list_for_user(self, user_id).await?;
        rows.retain(|row| from <= row.check_in_date && row.check_in_date <= to);
        Ok(rows)
    }

    async fn latest_for_user(&self, user_id: &UserId) -> Result<Option<CheckIn>, CheckInRepositoryError> {
        Ok(self
            .lock()
            .check_ins
            .values()
            .filter(|row| row.is_owned_by(user_id))
            .max_by_key(|row| row.check_in_date)
            .cloned())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, CheckInRepositoryError> {
        let state = self.lock();
        Ok(count(
            state
                .check_ins
                .values()
                .filter(|row| row.is_owned_by(user_id))
                .count(),
        ))
    }
}

#[async_trait]
impl UserStatsRepository for MemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserStats>, UserStatsRepositoryError> {
        Ok(self.lock().stats.get(user_id).copied())
    }

    async fn insert_if_absent(&self, stats: &UserStats) -> Result<bool, UserStatsRepositoryError> {
        let mut state = self.lock();
        if state.stats.contains_key(&stats.user_id) {
            return Ok(false);
        }
        state.stats.insert(stats.user_id, *stats);
        Ok(true)
    }

    async fn compare_and_set(
        &self,
        expected: &UserStats,
        next: &UserStats,
    ) -> Result<bool, UserStatsRepositoryError> {
        let mut state = self.lock();
        match state.stats.get_mut(&expected.user_id) {
            Some(stored) if stored == expected => {
                *stored = *next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl AchievementRepository for MemoryStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Achievement>, AchievementRepositoryError> {
        let state = self.lock();
        let mut rows: Vec<Achievement> = state
            .achievements
            .iter()
            .rev()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
        Ok(rows)
    }

    async fn insert_if_absent(
        &self,
        achievement: &NewAchievement,
    ) -> Result<Option<Achievement>, AchievementRepositoryError> {
        let mut state = self.lock();
        let exists = state.achievements.iter().any(|row| {
            row.user_id == achievement.user_id && row.achievement_key == achievement.achievement_key
        });
        if exists {
            return Ok(None);
        }
        let row = Achievement {
            id: Uuid::new_v4(),
            user_id: achievement.user_id,
            achievement_key: achievement.achievement_key.clone(),
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            unlocked_at: achievement.unlocked_at,
        };
        state.achievements.push(row.clone());
        Ok(Some(row))
    }
}

#[async_trait]
impl RoadmapRepository for MemoryStore {
    async fn insert(&self, roadmap: &NewRoadmap) -> Result<Roadmap, RoadmapRepositoryError> {
        let row = Roadmap {
            id: Uuid::new_v4(),
            user_id: roadmap.user_id,
            created_at: roadmap.created_at,
            document: roadmap.document.clone(),
        };
        self.lock().roadmaps.push(row.clone());
        Ok(row)
    }

    async fn latest_for_user(&self, user_id: &UserId) -> Result<Option<Roadmap>, RoadmapRepositoryError> {
        Ok(self
            .lock()
            .roadmaps
            .iter()
            .filter(|row| row.user_id == *user_id)
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, RoadmapRepositoryError> {
        let state = self.lock();
        Ok(count(
            state.roadmaps.iter().filter(|row| row.user_id == *user_id).count(),
        ))
    }
}

#[async_trait]
impl RoadmapProgressRepository for MemoryStore {
    async fn toggle(
        &self,
        user_id: &UserId,
        item_type: RoadmapItemType,
        item_name: &str,
    ) -> Result<RoadmapProgress, RoadmapRepositoryError> {
        let mut state = self.lock();
        let row = state
            .progress
            .entry((*user_id, item_type, item_name.to_owned()))
            .and_modify(|row| row.completed = !row.completed)
            .or_insert_with(|| RoadmapProgress {
                id: Uuid::new_v4(),
                user_id: *user_id,
                item_type,
                item_name: item_name.to_owned(),
                completed: true,
            });
        Ok(row.clone())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RoadmapProgress>, RoadmapRepositoryError> {
        let mut rows: Vec<RoadmapProgress> = self
            .lock()
            .progress
            .values()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.item_type, &a.item_name).cmp(&(b.item_type, &b.item_name)));
        Ok(rows)
    }
}

#[async_trait]
impl DailyTaskRepository for MemoryStore {
    async fn list_for_day(
        &self,
        user_id: &UserId,
        day: CalendarDay,
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError> {
        Ok(self
            .lock()
            .tasks
            .iter()
            .filter(|task| task.is_owned_by(user_id) && task.task_date == day)
            .cloned()
            .collect())
    }

    async fn insert_many(
        &self,
        tasks: &[NewDailyTask],
    ) -> Result<Vec<DailyTask>, DailyTaskRepositoryError> {
        let rows: Vec<DailyTask> = tasks
            .iter()
            .map(|task| DailyTask {
                id: Uuid::new_v4(),
                user_id: task.user_id,
                task_text: task.task_text.as_str().to_owned(),
                task_date: task.task_date,
                done: false,
                created_at: task.created_at,
            })
            .collect();
        self.lock().tasks.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<DailyTask>, DailyTaskRepositoryError> {
        Ok(self.lock().tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn set_done(&self, id: Uuid, done: bool) -> Result<Option<DailyTask>, DailyTaskRepositoryError> {
        Ok(self
            .lock()
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .map(|task| {
                task.done = done;
                task.clone()
            }))
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileRepositoryError> {
        Ok(self.lock().profiles.get(user_id).cloned())
    }

    async fn upsert(&self, profile: &UserProfile) -> Result<UserProfile, ProfileRepositoryError> {
        self.lock().profiles.insert(profile.user_id, profile.clone());
        Ok(profile.clone())
    }
}
