//! Daily check-in entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CalendarDay, UserId};

/// Validation failures for check-in input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInValidationError {
    #[error("mood must be between {min} and {max}, got {value}", min = Mood::MIN, max = Mood::MAX)]
    MoodOutOfRange { value: i64 },
}

/// Self-reported mood on a 1 to 10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Mood(u8);

impl Mood {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validate a raw mood score.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Mood;
    ///
    /// assert_eq!(Mood::new(7).unwrap().value(), 7);
    /// assert!(Mood::new(11).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, CheckInValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(CheckInValidationError::MoodOutOfRange { value })
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Mood {
    type Error = CheckInValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mood> for i64 {
    fn from(value: Mood) -> Self {
        i64::from(value.0)
    }
}

/// The user-authored part of a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInEntry {
    pub mood: Mood,
    pub content: String,
    pub challenges: String,
}

/// AI-generated fields attached to a check-in after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckInAnnotation {
    pub summary: String,
    pub suggestions: Vec<String>,
    pub mood_insight: Option<String>,
}

/// A stored check-in.
///
/// ## Invariants
/// - At most one check-in exists per `(user_id, check_in_date)`.
/// - `created_at` falls inside `check_in_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub id: Uuid,
    pub user_id: UserId,
    pub check_in_date: CalendarDay,
    pub created_at: DateTime<Utc>,
    pub entry: CheckInEntry,
    pub annotation: Option<CheckInAnnotation>,
}

impl CheckIn {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// Everything needed to upsert the check-in for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInUpsert {
    pub user_id: UserId,
    pub check_in_date: CalendarDay,
    /// Used only when a new row is created; updates keep the original value.
    pub created_at: DateTime<Utc>,
    pub entry: CheckInEntry,
}

/// A partial edit of an existing check-in; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckInEdit {
    pub mood: Option<Mood>,
    pub content: Option<String>,
    pub challenges: Option<String>,
}

impl CheckInEdit {
    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.content.is_none() && self.challenges.is_none()
    }

    /// Apply the edit to `entry`.
    pub fn apply_to(&self, entry: &CheckInEntry) -> CheckInEntry {
        CheckInEntry {
            mood: self.mood.unwrap_or(entry.mood),
            content: self.content.clone().unwrap_or_else(|| entry.content.clone()),
            challenges: self
                .challenges
                .clone()
                .unwrap_or_else(|| entry.challenges.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(10, true)]
    #[case(11, false)]
    #[case(-3, false)]
    #[case(300, false)]
    fn mood_range(#[case] raw: i64, #[case] valid: bool) {
        assert_eq!(Mood::new(raw).is_ok(), valid);
    }

    #[rstest]
    fn mood_deserialises_from_number() {
        let mood: Mood = serde_json::from_str("4").expect("valid mood");
        assert_eq!(mood.value(), 4);
        assert!(serde_json::from_str::<Mood>("12").is_err());
    }

    #[rstest]
    fn edit_keeps_unspecified_fields() {
        let entry = CheckInEntry {
            mood: Mood::new(5).expect("valid mood"),
            content: "wrote tests".into(),
            challenges: "flaky CI".into(),
        };
        let edit = CheckInEdit {
            content: Some("shipped feature".into()),
            ..CheckInEdit::default()
        };
        let updated = edit.apply_to(&entry);
        assert_eq!(updated.mood, entry.mood);
        assert_eq!(updated.content, "shipped feature");
        assert_eq!(updated.challenges, "flaky CI");
    }
}
