//! Streak and achievement domain service.
//!
//! Streak writes are optimistic: the first row is created with an
//! insert-if-absent and later rows are replaced only if they still hold the
//! values the transition was computed from. A lost race re-reads and tries
//! again, up to [`MAX_STREAK_ATTEMPTS`] times.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AchievementRepository, AchievementsQuery, CheckInRepository, ProgressCommand,
    RoadmapRepository, StreakUpdate, UserStatsRepository,
};
use crate::domain::{
    Achievement, AchievementFacts, CalendarDay, Error, NewAchievement, StreakTransition, UserId,
    UserStats, evaluate_achievements,
};

/// Attempts made before a contended streak update gives up.
pub const MAX_STREAK_ATTEMPTS: usize = 3;

/// Repositories the progress service reads and writes.
pub struct ProgressRepositories<S, A, C, R> {
    pub stats: Arc<S>,
    pub achievements: Arc<A>,
    pub check_ins: Arc<C>,
    pub roadmaps: Arc<R>,
}

/// Service implementing [`ProgressCommand`] and [`AchievementsQuery`].
pub struct ProgressService<S, A, C, R> {
    repos: ProgressRepositories<S, A, C, R>,
    clock: Arc<dyn Clock>,
}

impl<S, A, C, R> ProgressService<S, A, C, R> {
    pub fn new(repos: ProgressRepositories<S, A, C, R>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }
}

impl<S, A, C, R> ProgressService<S, A, C, R>
where
    S: UserStatsRepository,
    A: AchievementRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn write_transition(
        &self,
        prior: Option<&UserStats>,
        next: &UserStats,
        transition: StreakTransition,
    ) -> Result<bool, Error> {
        let written = match (prior, transition) {
            (_, StreakTransition::Unchanged) => true,
            (None, _) => self.repos.stats.insert_if_absent(next).await?,
            (Some(prior), _) => self.repos.stats.compare_and_set(prior, next).await?,
        };
        Ok(written)
    }

    async fn facts(&self, user_id: &UserId) -> Result<AchievementFacts, Error> {
        let total_check_ins = self.repos.check_ins.count_for_user(user_id).await?;
        let current_streak = self
            .repos
            .stats
            .find(user_id)
            .await?
            .map_or(0, |stats| stats.current_streak);
        let roadmap_count = self.repos.roadmaps.count_for_user(user_id).await?;
        Ok(AchievementFacts {
            total_check_ins,
            current_streak,
            roadmap_count,
        })
    }
}

#[async_trait]
impl<S, A, C, R> ProgressCommand for ProgressService<S, A, C, R>
where
    S: UserStatsRepository,
    A: AchievementRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn update_streak(&self, user_id: &UserId) -> Result<StreakUpdate, Error> {
        let today = CalendarDay::today(self.clock.as_ref());

        for attempt in 1..=MAX_STREAK_ATTEMPTS {
            let prior = self.repos.stats.find(user_id).await?;
            let (next, transition) = UserStats::advance(prior.as_ref(), *user_id, today);

            if self
                .write_transition(prior.as_ref(), &next, transition)
                .await?
            {
                info!(
                    %user_id,
                    ?transition,
                    current_streak = next.current_streak,
                    longest_streak = next.longest_streak,
                    "streak updated"
                );
                return Ok(StreakUpdate {
                    stats: next,
                    transition,
                });
            }
            debug!(%user_id, attempt, "streak write lost a race; re-reading");
        }

        warn!(%user_id, attempts = MAX_STREAK_ATTEMPTS, "streak update abandoned");
        Err(Error::upstream(
            "streak update kept conflicting with concurrent writes",
        ))
    }

    async fn check_achievements(&self, user_id: &UserId) -> Result<Vec<Achievement>, Error> {
        let unlocked: HashSet<String> = self
            .repos
            .achievements
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|achievement| achievement.achievement_key)
            .collect();
        let facts = self.facts(user_id).await?;
        let now = self.clock.utc();

        let mut awarded = Vec::new();
        for rule in evaluate_achievements(&facts, &unlocked) {
            let candidate = NewAchievement::from_rule(*user_id, rule, now);
            match self.repos.achievements.insert_if_absent(&candidate).await? {
                Some(row) => {
                    info!(%user_id, key = rule.key, "achievement unlocked");
                    awarded.push(row);
                }
                None => debug!(%user_id, key = rule.key, "achievement already unlocked"),
            }
        }
        Ok(awarded)
    }
}

#[async_trait]
impl<S, A, C, R> AchievementsQuery for ProgressService<S, A, C, R>
where
    S: UserStatsRepository,
    A: AchievementRepository,
    C: CheckInRepository,
    R: RoadmapRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Achievement>, Error> {
        Ok(self.repos.achievements.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
#[path = "progress_service_tests.rs"]
mod tests;
