//! Driving port for the full daily progress pipeline.

use async_trait::async_trait;

use crate::domain::{Achievement, AnnotationPayload, CheckIn, Error, UserId};

use super::{StreakUpdate, SubmitCheckIn};

/// What happened to the best-effort annotation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationOutcome {
    Annotated(AnnotationPayload),
    Failed(Error),
}

/// Combined result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProgressOutcome {
    pub check_in: CheckIn,
    pub streak: StreakUpdate,
    pub awarded: Vec<Achievement>,
    pub annotation: AnnotationOutcome,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DailyProgressCommand: Send + Sync {
    /// Upsert the check-in, then update streak and achievements while the
    /// annotation runs alongside.
    async fn record(
        &self,
        user_id: &UserId,
        submission: SubmitCheckIn,
    ) -> Result<DailyProgressOutcome, Error>;
}
