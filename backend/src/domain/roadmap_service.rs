//! Roadmap domain service.
//!
//! Generates roadmaps through the completion service, appends them, and
//! reports per-item progress against the newest one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    NewRoadmap, ProfileRepository, RoadmapCommand, RoadmapOverview, RoadmapProgressRepository,
    RoadmapQuery, RoadmapRepository, RoadmapRequest, TextCompletion,
};
use crate::domain::{
    CompletionSummary, Error, Roadmap, RoadmapDocument, RoadmapItemType, RoadmapProgress, UserId,
    parse_completion, roadmap_prompt,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Service implementing [`RoadmapCommand`] and [`RoadmapQuery`].
pub struct RoadmapService<R, P, F> {
    roadmaps: Arc<R>,
    progress: Arc<P>,
    profiles: Arc<F>,
    completion: Arc<dyn TextCompletion>,
    clock: Arc<dyn Clock>,
}

impl<R, P, F> RoadmapService<R, P, F> {
    pub fn new(
        roadmaps: Arc<R>,
        progress: Arc<P>,
        profiles: Arc<F>,
        completion: Arc<dyn TextCompletion>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roadmaps,
            progress,
            profiles,
            completion,
            clock,
        }
    }
}

impl<R, P, F> RoadmapService<R, P, F>
where
    R: RoadmapRepository,
    P: RoadmapProgressRepository,
    F: ProfileRepository,
{
    /// Fill missing roles from the saved profile.
    async fn resolve_roles(
        &self,
        user_id: &UserId,
        request: RoadmapRequest,
    ) -> Result<(String, String), Error> {
        let mut current = non_blank(request.current_role);
        let mut target = non_blank(request.target_role);
        if current.is_none() || target.is_none() {
            if let Some(saved) = self.profiles.find(user_id).await? {
                current = current.or_else(|| non_blank(Some(saved.profile.current_role)));
                target = target.or_else(|| non_blank(Some(saved.profile.target_role)));
            }
        }
        match (current, target) {
            (Some(current), Some(target)) => Ok((current, target)),
            _ => Err(Error::invalid_request("Missing currentRole or targetRole")),
        }
    }
}

#[async_trait]
impl<R, P, F> RoadmapCommand for RoadmapService<R, P, F>
where
    R: RoadmapRepository,
    P: RoadmapProgressRepository,
    F: ProfileRepository,
{
    async fn generate(&self, user_id: &UserId, request: RoadmapRequest) -> Result<Roadmap, Error> {
        let (current_role, target_role) = self.resolve_roles(user_id, request).await?;
        let raw = self
            .completion
            .complete(&roadmap_prompt(&current_role, &target_role))
            .await?;
        let document: RoadmapDocument = parse_completion(&raw).map_err(|err| {
            warn!(%user_id, reason = %err.reason, "roadmap completion unusable");
            Error::from(err)
        })?;

        let roadmap = self
            .roadmaps
            .insert(&NewRoadmap {
                user_id: *user_id,
                created_at: self.clock.utc(),
                document,
            })
            .await?;
        info!(
            %user_id,
            roadmap_id = %roadmap.id,
            items = roadmap.document.item_count(),
            "roadmap generated"
        );
        Ok(roadmap)
    }

    async fn toggle_progress(
        &self,
        user_id: &UserId,
        item_type: RoadmapItemType,
        item_name: String,
    ) -> Result<RoadmapProgress, Error> {
        if item_name.trim().is_empty() {
            return Err(Error::invalid_request("itemName must not be empty"));
        }
        let row = self.progress.toggle(user_id, item_type, &item_name).await?;
        info!(%user_id, %item_type, completed = row.completed, "roadmap item toggled");
        Ok(row)
    }
}

#[async_trait]
impl<R, P, F> RoadmapQuery for RoadmapService<R, P, F>
where
    R: RoadmapRepository,
    P: RoadmapProgressRepository,
    F: ProfileRepository,
{
    async fn latest(&self, user_id: &UserId) -> Result<Option<RoadmapOverview>, Error> {
        let Some(roadmap) = self.roadmaps.latest_for_user(user_id).await? else {
            return Ok(None);
        };
        let progress = self.progress.list_for_user(user_id).await?;
        let summary = CompletionSummary::compute(&roadmap.document, &progress);
        Ok(Some(RoadmapOverview {
            roadmap,
            progress,
            summary,
        }))
    }

    async fn next_steps(&self, user_id: &UserId) -> Result<Option<RoadmapDocument>, Error> {
        Ok(self
            .roadmaps
            .latest_for_user(user_id)
            .await?
            .map(|roadmap| roadmap.document))
    }
}
