//! UTC calendar days.
//!
//! Check-ins, streaks and daily tasks are bucketed by the UTC calendar day
//! `[00:00Z, 00:00Z + 24h)`. "Today" always comes from an injected
//! [`mockable::Clock`] so callers never consult server local time.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a `YYYY-MM-DD` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("date must be formatted as YYYY-MM-DD, got {raw:?}")]
pub struct CalendarDayParseError {
    raw: String,
}

/// A single UTC calendar day.
///
/// # Examples
/// ```
/// use backend::domain::CalendarDay;
///
/// let day = CalendarDay::parse("2026-03-01").unwrap();
/// assert_eq!(day.previous().unwrap().to_string(), "2026-02-28");
/// assert_eq!(day.start().to_rfc3339(), "2026-03-01T00:00:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The UTC day containing the clock's current instant.
    pub fn today(clock: &dyn Clock) -> Self {
        Self::containing(clock.utc())
    }

    /// The UTC day containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(raw: &str) -> Result<Self, CalendarDayParseError> {
        NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|_| CalendarDayParseError {
                raw: raw.to_owned(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Inclusive start of the day.
    pub fn start(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// The day before, or `None` at the start of the representable range.
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Step back `days` whole days, saturating at the earliest representable date.
    pub fn minus_days(&self, days: u64) -> Self {
        self.0
            .checked_sub_days(chrono::Days::new(days))
            .map_or(Self(NaiveDate::MIN), Self)
    }

    /// Signed whole-day distance from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("2026-01-15", true)]
    #[case(" 2026-01-15 ", true)]
    #[case("15/01/2026", false)]
    #[case("2026-02-30", false)]
    fn parses_iso_dates(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(CalendarDay::parse(raw).is_ok(), ok);
    }

    #[rstest]
    fn midnight_opens_the_next_day() {
        let day = CalendarDay::parse("2026-01-15").expect("valid date");
        let midnight = Utc.with_ymd_and_hms(2026, 1, 16, 0, 0, 0).unwrap();
        assert_eq!(day.start(), Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(CalendarDay::containing(day.start()), day);
        assert_eq!(
            CalendarDay::containing(midnight - chrono::TimeDelta::nanoseconds(1)),
            day
        );
        assert_eq!(CalendarDay::containing(midnight).days_since(day), 1);
    }

    #[rstest]
    fn late_evening_belongs_to_same_utc_day() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 23, 59, 59).unwrap();
        assert_eq!(CalendarDay::containing(instant).to_string(), "2026-01-15");
    }

    #[rstest]
    fn day_arithmetic_crosses_month_boundaries() {
        let day = CalendarDay::parse("2026-03-01").expect("valid date");
        assert_eq!(day.minus_days(6).to_string(), "2026-02-23");
        assert_eq!(day.days_since(day.minus_days(6)), 6);
    }
}
