//! The daily progress pipeline.
//!
//! The check-in upsert runs first. Once it has committed, the streak and
//! achievement stages run in order while the annotation runs alongside them.
//! An annotation failure is reported in the outcome and never fails the
//! pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future;
use tracing::{info, warn};

use crate::domain::ports::{
    AnnotationOutcome, CheckInCommand, DailyProgressCommand, DailyProgressOutcome,
    ProgressCommand, SubmitCheckIn,
};
use crate::domain::{CheckInAnnotation, Error, UserId};

/// Service implementing [`DailyProgressCommand`] over the check-in and
/// progress commands.
#[derive(Clone)]
pub struct DailyProgressService {
    check_ins: Arc<dyn CheckInCommand>,
    progress: Arc<dyn ProgressCommand>,
}

impl DailyProgressService {
    pub fn new(check_ins: Arc<dyn CheckInCommand>, progress: Arc<dyn ProgressCommand>) -> Self {
        Self {
            check_ins,
            progress,
        }
    }
}

#[async_trait]
impl DailyProgressCommand for DailyProgressService {
    async fn record(
        &self,
        user_id: &UserId,
        submission: SubmitCheckIn,
    ) -> Result<DailyProgressOutcome, Error> {
        let mut check_in = self.check_ins.submit(user_id, submission).await?;

        let progress = async {
            let streak = self.progress.update_streak(user_id).await?;
            let awarded = self.progress.check_achievements(user_id).await?;
            Ok::<_, Error>((streak, awarded))
        };
        let annotation = self.check_ins.annotate(user_id, check_in.id);
        let (progress, annotation) = future::join(progress, annotation).await;
        let (streak, awarded) = progress?;

        let annotation = match annotation {
            Ok(payload) => {
                check_in.annotation = Some(CheckInAnnotation {
                    summary: payload.summary.clone(),
                    suggestions: payload.suggestions.clone(),
                    mood_insight: payload.mood_insight.clone(),
                });
                AnnotationOutcome::Annotated(payload)
            }
            Err(err) => {
                warn!(
                    %user_id,
                    check_in_id = %check_in.id,
                    code = ?err.code(),
                    "annotation failed; check-in kept without AI fields"
                );
                AnnotationOutcome::Failed(err)
            }
        };

        info!(
            %user_id,
            check_in_id = %check_in.id,
            current_streak = streak.stats.current_streak,
            awarded = awarded.len(),
            "daily progress recorded"
        );
        Ok(DailyProgressOutcome {
            check_in,
            streak,
            awarded,
            annotation,
        })
    }
}
