//! Driving ports for roadmaps.

use async_trait::async_trait;

use crate::domain::{
    CompletionSummary, Error, Roadmap, RoadmapDocument, RoadmapItemType, RoadmapProgress, UserId,
};

/// Roles to plan between; missing values fall back to the saved profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapRequest {
    pub current_role: Option<String>,
    pub target_role: Option<String>,
}

/// The latest roadmap with its progress rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapOverview {
    pub roadmap: Roadmap,
    pub progress: Vec<RoadmapProgress>,
    pub summary: CompletionSummary,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoadmapCommand: Send + Sync {
    /// Generate and append a new roadmap.
    async fn generate(&self, user_id: &UserId, request: RoadmapRequest) -> Result<Roadmap, Error>;

    /// Flip one item's completion flag.
    async fn toggle_progress(
        &self,
        user_id: &UserId,
        item_type: RoadmapItemType,
        item_name: String,
    ) -> Result<RoadmapProgress, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoadmapQuery: Send + Sync {
    async fn latest(&self, user_id: &UserId) -> Result<Option<RoadmapOverview>, Error>;

    /// The latest roadmap's raw sections.
    async fn next_steps(&self, user_id: &UserId) -> Result<Option<RoadmapDocument>, Error>;
}
