//! Driving ports for check-ins.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AnnotationPayload, CalendarDay, CheckIn, CheckInEdit, CheckInEntry, Error, UserId};

/// A check-in submission. Without `date` the entry lands on today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitCheckIn {
    pub entry: CheckInEntry,
    pub date: Option<CalendarDay>,
}

/// Mutating check-in use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInCommand: Send + Sync {
    /// Create or overwrite the check-in for the submission's day.
    async fn submit(&self, user_id: &UserId, submission: SubmitCheckIn) -> Result<CheckIn, Error>;

    /// Edit a check-in the user owns.
    async fn edit(&self, user_id: &UserId, id: Uuid, edit: CheckInEdit) -> Result<CheckIn, Error>;

    /// Ask the completion service for a summary and store it on the check-in.
    ///
    /// The check-in itself is never modified when this fails.
    async fn annotate(&self, user_id: &UserId, id: Uuid) -> Result<AnnotationPayload, Error>;
}

/// Read-only check-in use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckInQuery: Send + Sync {
    /// All of the user's check-ins, oldest first.
    async fn history(&self, user_id: &UserId) -> Result<Vec<CheckIn>, Error>;
}
