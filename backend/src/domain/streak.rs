//! Streak evaluation.
//!
//! A streak counts consecutive UTC calendar days with at least one check-in.
//! [`UserStats::advance`] is the whole state machine; persistence and
//! concurrency control live in the progress service.

use serde::Serialize;

use crate::domain::{CalendarDay, UserId};

/// How a streak update changed the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// No prior state; the streak starts at one.
    Started,
    /// Already counted today; nothing changes.
    Unchanged,
    /// Last check-in was yesterday; the streak grows by one.
    Extended,
    /// A gap of two or more days, or a last check-in in the future.
    Reset,
}

/// Per-user streak counters.
///
/// ## Invariants
/// - `longest_streak >= current_streak` after every transition.
/// - `current_streak >= 1` once a row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: UserId,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_check_in: CalendarDay,
}

impl UserStats {
    /// State for a user's first counted day.
    pub fn first(user_id: UserId, today: CalendarDay) -> Self {
        Self {
            user_id,
            current_streak: 1,
            longest_streak: 1,
            last_check_in: today,
        }
    }

    /// Apply one streak update for `today`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CalendarDay, StreakTransition, UserId, UserStats};
    ///
    /// let monday = CalendarDay::parse("2026-01-05").unwrap();
    /// let tuesday = CalendarDay::parse("2026-01-06").unwrap();
    /// let (stats, transition) = UserStats::advance(None, UserId::random(), monday);
    /// assert_eq!(transition, StreakTransition::Started);
    ///
    /// let (stats, transition) = UserStats::advance(Some(&stats), stats.user_id, tuesday);
    /// assert_eq!(transition, StreakTransition::Extended);
    /// assert_eq!(stats.current_streak, 2);
    /// ```
    pub fn advance(
        prior: Option<&Self>,
        user_id: UserId,
        today: CalendarDay,
    ) -> (Self, StreakTransition) {
        let Some(prior) = prior else {
            return (Self::first(user_id, today), StreakTransition::Started);
        };

        let (current, transition) = match today.days_since(prior.last_check_in) {
            0 => (prior.current_streak, StreakTransition::Unchanged),
            1 => (
                prior.current_streak.saturating_add(1),
                StreakTransition::Extended,
            ),
            _ => (1, StreakTransition::Reset),
        };

        if transition == StreakTransition::Unchanged {
            return (*prior, transition);
        }

        let next = Self {
            user_id: prior.user_id,
            current_streak: current,
            longest_streak: prior.longest_streak.max(current),
            last_check_in: today,
        };
        (next, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn day(raw: &str) -> CalendarDay {
        CalendarDay::parse(raw).expect("valid date")
    }

    #[fixture]
    fn user() -> UserId {
        UserId::random()
    }

    fn stats(user: UserId, current: u32, longest: u32, last: &str) -> UserStats {
        UserStats {
            user_id: user,
            current_streak: current,
            longest_streak: longest,
            last_check_in: day(last),
        }
    }

    #[rstest]
    fn first_update_starts_at_one(user: UserId) {
        let (next, transition) = UserStats::advance(None, user, day("2026-01-10"));
        assert_eq!(transition, StreakTransition::Started);
        assert_eq!((next.current_streak, next.longest_streak), (1, 1));
    }

    #[rstest]
    fn same_day_is_a_no_op(user: UserId) {
        let prior = stats(user, 4, 9, "2026-01-10");
        let (next, transition) = UserStats::advance(Some(&prior), user, day("2026-01-10"));
        assert_eq!(transition, StreakTransition::Unchanged);
        assert_eq!(next, prior);
    }

    #[rstest]
    #[case(2, 2, 3, 3)]
    #[case(5, 9, 6, 9)]
    fn consecutive_day_extends(
        user: UserId,
        #[case] current: u32,
        #[case] longest: u32,
        #[case] expected_current: u32,
        #[case] expected_longest: u32,
    ) {
        let prior = stats(user, current, longest, "2026-01-09");
        let (next, transition) = UserStats::advance(Some(&prior), user, day("2026-01-10"));
        assert_eq!(transition, StreakTransition::Extended);
        assert_eq!(next.current_streak, expected_current);
        assert_eq!(next.longest_streak, expected_longest);
        assert_eq!(next.last_check_in, day("2026-01-10"));
    }

    #[rstest]
    #[case("2026-01-08")]
    #[case("2025-12-01")]
    #[case("2026-01-12")]
    fn gaps_and_future_dates_reset(user: UserId, #[case] last: &str) {
        let prior = stats(user, 6, 6, last);
        let (next, transition) = UserStats::advance(Some(&prior), user, day("2026-01-10"));
        assert_eq!(transition, StreakTransition::Reset);
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.longest_streak, 6);
    }

    #[rstest]
    fn longest_never_trails_current_over_a_run(user: UserId) {
        let mut state: Option<UserStats> = None;
        let days = [
            "2026-01-01",
            "2026-01-02",
            "2026-01-02",
            "2026-01-03",
            "2026-01-07",
            "2026-01-08",
            "2026-01-09",
            "2026-01-10",
            "2026-01-11",
        ];
        for raw in days {
            let (next, _) = UserStats::advance(state.as_ref(), user, day(raw));
            assert!(next.longest_streak >= next.current_streak);
            state = Some(next);
        }
        let last = state.expect("state after updates");
        assert_eq!((last.current_streak, last.longest_streak), (5, 5));
    }
}
