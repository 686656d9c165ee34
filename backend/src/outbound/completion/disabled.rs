//! Completion adapter used when no API key is configured.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{CompletionRequest, CompletionServiceError, TextCompletion};

/// Rejects every request with [`CompletionServiceError::NotConfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCompletion;

#[async_trait]
impl TextCompletion for DisabledCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionServiceError> {
        warn!("completion requested but no API key is configured");
        Err(CompletionServiceError::not_configured())
    }
}
