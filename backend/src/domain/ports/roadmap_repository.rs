//! Ports for roadmaps and roadmap progress.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Roadmap, RoadmapDocument, RoadmapItemType, RoadmapProgress, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by roadmap and roadmap progress adapters.
    pub enum RoadmapRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "roadmap repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "roadmap repository query failed: {message}",
        /// A stored document could not be decoded.
        Decode { message: String } => "stored roadmap could not be decoded: {message}",
    }
}

impl From<RoadmapRepositoryError> for Error {
    fn from(value: RoadmapRepositoryError) -> Self {
        match value {
            RoadmapRepositoryError::Decode { .. } => Error::internal(value.to_string()),
            other => Error::upstream(other.to_string()),
        }
    }
}

/// A roadmap ready to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoadmap {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub document: RoadmapDocument,
}

/// Append-only roadmap storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoadmapRepository: Send + Sync {
    async fn insert(&self, roadmap: &NewRoadmap) -> Result<Roadmap, RoadmapRepositoryError>;

    /// The most recently created roadmap for the user.
    async fn latest_for_user(&self, user_id: &UserId)
    -> Result<Option<Roadmap>, RoadmapRepositoryError>;

    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, RoadmapRepositoryError>;
}

/// Per-item completion flags, unique per `(user_id, item_type, item_name)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoadmapProgressRepository: Send + Sync {
    /// Flip the completion flag in one atomic write.
    ///
    /// A missing row counts as not completed, so the first toggle stores
    /// `completed = true`.
    async fn toggle(
        &self,
        user_id: &UserId,
        item_type: RoadmapItemType,
        item_name: &str,
    ) -> Result<RoadmapProgress, RoadmapRepositoryError>;

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RoadmapProgress>, RoadmapRepositoryError>;
}
