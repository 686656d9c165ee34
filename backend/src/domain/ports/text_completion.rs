//! Port for the external text-completion service.
//!
//! The service receives a system and a user message and returns one block of
//! text. Interpreting that text is the caller's job; see
//! [`crate::domain::parse_completion`].

use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

/// A two-message chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

define_port_error! {
    /// Errors raised by completion adapters.
    pub enum CompletionServiceError {
        /// No API key was configured.
        NotConfigured => "completion service is not configured",
        /// The request did not reach the service or timed out.
        Transport { message: String } => "completion service transport failed: {message}",
        /// The service answered with a non-success status.
        Upstream { status: u16, message: String } =>
            "completion service returned status {status}: {message}",
        /// The response envelope could not be decoded.
        Decode { message: String } => "completion response could not be decoded: {message}",
    }
}

impl From<CompletionServiceError> for Error {
    fn from(value: CompletionServiceError) -> Self {
        Error::upstream(value.to_string())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send one prompt and return the raw completion text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionServiceError>;
}
