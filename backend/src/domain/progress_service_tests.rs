//! Tests for the streak and achievement service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::always;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockAchievementRepository, MockCheckInRepository, MockRoadmapRepository,
    MockUserStatsRepository,
};
use crate::test_support::MutableClock;

type Service = ProgressService<
    MockUserStatsRepository,
    MockAchievementRepository,
    MockCheckInRepository,
    MockRoadmapRepository,
>;

struct Mocks {
    stats: MockUserStatsRepository,
    achievements: MockAchievementRepository,
    check_ins: MockCheckInRepository,
    roadmaps: MockRoadmapRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            stats: MockUserStatsRepository::new(),
            achievements: MockAchievementRepository::new(),
            check_ins: MockCheckInRepository::new(),
            roadmaps: MockRoadmapRepository::new(),
        }
    }

    fn into_service(self) -> Service {
        let clock = MutableClock::new(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        ProgressService::new(
            ProgressRepositories {
                stats: Arc::new(self.stats),
                achievements: Arc::new(self.achievements),
                check_ins: Arc::new(self.check_ins),
                roadmaps: Arc::new(self.roadmaps),
            },
            Arc::new(clock),
        )
    }
}

#[fixture]
fn user() -> UserId {
    UserId::random()
}

fn day(raw: &str) -> CalendarDay {
    CalendarDay::parse(raw).expect("valid date")
}

fn stats(user: UserId, current: u32, longest: u32, last: &str) -> UserStats {
    UserStats {
        user_id: user,
        current_streak: current,
        longest_streak: longest,
        last_check_in: day(last),
    }
}

fn achievement_row(candidate: &NewAchievement) -> Achievement {
    Achievement {
        id: Uuid::new_v4(),
        user_id: candidate.user_id,
        achievement_key: candidate.achievement_key.clone(),
        title: candidate.title.clone(),
        description: candidate.description.clone(),
        unlocked_at: candidate.unlocked_at,
    }
}

#[rstest]
#[tokio::test]
async fn first_update_inserts_initial_row(user: UserId) {
    let mut mocks = Mocks::new();
    mocks.stats.expect_find().return_once(|_| Ok(None));
    mocks
        .stats
        .expect_insert_if_absent()
        .withf(|row| row.current_streak == 1 && row.longest_streak == 1)
        .times(1)
        .return_once(|_| Ok(true));
    mocks.stats.expect_compare_and_set().times(0);

    let update = mocks
        .into_service()
        .update_streak(&user)
        .await
        .expect("streak update succeeds");

    assert_eq!(update.transition, StreakTransition::Started);
    assert_eq!(update.stats.last_check_in, day("2026-03-10"));
}

#[rstest]
#[tokio::test]
async fn same_day_update_writes_nothing(user: UserId) {
    let mut mocks = Mocks::new();
    let prior = stats(user, 4, 4, "2026-03-10");
    mocks.stats.expect_find().return_once(move |_| Ok(Some(prior)));
    mocks.stats.expect_insert_if_absent().times(0);
    mocks.stats.expect_compare_and_set().times(0);

    let update = mocks
        .into_service()
        .update_streak(&user)
        .await
        .expect("streak update succeeds");

    assert_eq!(update.transition, StreakTransition::Unchanged);
    assert_eq!(update.stats, prior);
}

#[rstest]
#[tokio::test]
async fn lost_race_rereads_and_retries(user: UserId) {
    let mut mocks = Mocks::new();
    let mut seq = mockall::Sequence::new();
    let stale = stats(user, 2, 5, "2026-03-08");
    let fresh = stats(user, 3, 5, "2026-03-09");
    mocks
        .stats
        .expect_find()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| Ok(Some(stale)));
    mocks
        .stats
        .expect_compare_and_set()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(false));
    mocks
        .stats
        .expect_find()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(move |_| Ok(Some(fresh)));
    mocks
        .stats
        .expect_compare_and_set()
        .withf(move |expected, next| *expected == fresh && next.current_streak == 4)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(true));

    let update = mocks
        .into_service()
        .update_streak(&user)
        .await
        .expect("second attempt succeeds");

    assert_eq!(update.transition, StreakTransition::Extended);
    assert_eq!((update.stats.current_streak, update.stats.longest_streak), (4, 5));
}

#[rstest]
#[tokio::test]
async fn persistent_contention_gives_up(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .stats
        .expect_find()
        .times(MAX_STREAK_ATTEMPTS)
        .returning(|_| Ok(None));
    mocks
        .stats
        .expect_insert_if_absent()
        .times(MAX_STREAK_ATTEMPTS)
        .returning(|_| Ok(false));

    let err = mocks
        .into_service()
        .update_streak(&user)
        .await
        .expect_err("contention");

    assert_eq!(err.code(), ErrorCode::UpstreamFailure);
}

#[rstest]
#[tokio::test]
async fn first_check_in_awards_only_first_checkin(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .achievements
        .expect_list_for_user()
        .return_once(|_| Ok(Vec::new()));
    mocks.check_ins.expect_count_for_user().return_once(|_| Ok(1));
    let current = stats(user, 1, 1, "2026-03-10");
    mocks
        .stats
        .expect_find()
        .return_once(move |_| Ok(Some(current)));
    mocks.roadmaps.expect_count_for_user().return_once(|_| Ok(0));
    mocks
        .achievements
        .expect_insert_if_absent()
        .with(always())
        .times(1)
        .returning(|candidate| Ok(Some(achievement_row(candidate))));

    let awarded = mocks
        .into_service()
        .check_achievements(&user)
        .await
        .expect("evaluation succeeds");

    let keys: Vec<_> = awarded.iter().map(|a| a.achievement_key.as_str()).collect();
    assert_eq!(keys, ["first-checkin"]);
}

#[rstest]
#[tokio::test]
async fn concurrent_award_is_not_reported_twice(user: UserId) {
    let mut mocks = Mocks::new();
    mocks
        .achievements
        .expect_list_for_user()
        .return_once(|_| Ok(Vec::new()));
    mocks.check_ins.expect_count_for_user().return_once(|_| Ok(3));
    let current = stats(user, 2, 2, "2026-03-10");
    mocks
        .stats
        .expect_find()
        .return_once(move |_| Ok(Some(current)));
    mocks.roadmaps.expect_count_for_user().return_once(|_| Ok(0));
    mocks
        .achievements
        .expect_insert_if_absent()
        .times(3)
        .returning(|candidate| {
            if candidate.achievement_key == "three-checkins" {
                Ok(None)
            } else {
                Ok(Some(achievement_row(candidate)))
            }
        });

    let awarded = mocks
        .into_service()
        .check_achievements(&user)
        .await
        .expect("evaluation succeeds");

    let keys: Vec<_> = awarded.iter().map(|a| a.achievement_key.as_str()).collect();
    assert_eq!(keys, ["first-checkin", "first-streak"]);
}

#[rstest]
#[tokio::test]
async fn nothing_awarded_when_everything_unlocked(user: UserId) {
    let mut mocks = Mocks::new();
    mocks.achievements.expect_list_for_user().return_once(move |_| {
        Ok(["first-checkin", "roadmap-created"]
            .into_iter()
            .map(|key| {
                achievement_row(&NewAchievement {
                    user_id: user,
                    achievement_key: key.to_owned(),
                    title: String::new(),
                    description: String::new(),
                    unlocked_at: Utc::now(),
                })
            })
            .collect())
    });
    mocks.check_ins.expect_count_for_user().return_once(|_| Ok(1));
    mocks.stats.expect_find().return_once(|_| Ok(None));
    mocks.roadmaps.expect_count_for_user().return_once(|_| Ok(1));
    mocks.achievements.expect_insert_if_absent().times(0);

    let awarded = mocks
        .into_service()
        .check_achievements(&user)
        .await
        .expect("evaluation succeeds");

    assert!(awarded.is_empty());
}
