//! Achievement rules and evaluation.
//!
//! Rules are a fixed, ordered table of thresholds over three facts about a
//! user. Evaluation is pure; the caller persists the returned awards and the
//! store's unique `(user_id, achievement_key)` index settles races.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::UserId;

/// Facts the rule table is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementFacts {
    pub total_check_ins: u64,
    pub current_streak: u32,
    pub roadmap_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threshold {
    CheckIns(u64),
    Streak(u32),
    Roadmaps(u64),
}

/// One entry of the achievement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementRule {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    threshold: Threshold,
}

const fn rule(
    key: &'static str,
    title: &'static str,
    description: &'static str,
    threshold: Threshold,
) -> AchievementRule {
    AchievementRule {
        key,
        title,
        description,
        threshold,
    }
}

/// The achievement table, in evaluation order.
pub static ACHIEVEMENT_RULES: [AchievementRule; 7] = [
    rule(
        "first-checkin",
        "First Check-In!",
        "You completed your first daily check-in 🎉",
        Threshold::CheckIns(1),
    ),
    rule(
        "three-checkins",
        "3 Check-Ins",
        "You've checked in three times!",
        Threshold::CheckIns(3),
    ),
    rule(
        "seven-checkins",
        "One Week of Check-Ins",
        "A full week! Great consistency 🔥",
        Threshold::CheckIns(7),
    ),
    rule(
        "first-streak",
        "You're on a streak!",
        "You've kept a streak going 🔥",
        Threshold::Streak(2),
    ),
    rule(
        "seven-streak",
        "7-Day Streak",
        "A whole week without breaking the chain 💪",
        Threshold::Streak(7),
    ),
    rule(
        "thirty-streak",
        "30-Day Streak",
        "Thirty days of consistency, huge respect 🏆",
        Threshold::Streak(30),
    ),
    rule(
        "roadmap-created",
        "Roadmap Created",
        "You've created your career roadmap 🚀",
        Threshold::Roadmaps(1),
    ),
];

impl AchievementRule {
    pub fn is_met(&self, facts: &AchievementFacts) -> bool {
        match self.threshold {
            Threshold::CheckIns(min) => facts.total_check_ins >= min,
            Threshold::Streak(min) => facts.current_streak >= min,
            Threshold::Roadmaps(min) => facts.roadmap_count >= min,
        }
    }
}

/// Return the rules that `facts` satisfy and that are not in `unlocked`.
///
/// Running this twice with the same inputs plus the first run's output added
/// to `unlocked` yields nothing.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use backend::domain::{evaluate_achievements, AchievementFacts};
///
/// let facts = AchievementFacts { total_check_ins: 1, current_streak: 1, roadmap_count: 0 };
/// let awarded = evaluate_achievements(&facts, &HashSet::new());
/// let keys: Vec<_> = awarded.iter().map(|rule| rule.key).collect();
/// assert_eq!(keys, ["first-checkin"]);
/// ```
pub fn evaluate_achievements(
    facts: &AchievementFacts,
    unlocked: &HashSet<String>,
) -> Vec<&'static AchievementRule> {
    ACHIEVEMENT_RULES
        .iter()
        .filter(|rule| rule.is_met(facts) && !unlocked.contains(rule.key))
        .collect()
}

/// An unlocked achievement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: UserId,
    pub achievement_key: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

/// A new achievement row ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAchievement {
    pub user_id: UserId,
    pub achievement_key: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
}

impl NewAchievement {
    pub fn from_rule(user_id: UserId, rule: &AchievementRule, unlocked_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            achievement_key: rule.key.to_owned(),
            title: rule.title.to_owned(),
            description: rule.description.to_owned(),
            unlocked_at,
        }
    }
}
