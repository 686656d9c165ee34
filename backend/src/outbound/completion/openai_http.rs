//! Reqwest-backed adapter for OpenAI-compatible chat completion endpoints.
//!
//! The adapter owns transport details only: it posts a system and a user
//! message, maps HTTP failures onto [`CompletionServiceError`] and returns
//! the first choice's text untouched. Fence stripping and payload validation
//! happen in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::dto::{ChatMessageDto, ChatRequestDto, ChatResponseDto, ErrorEnvelopeDto};
use crate::domain::ports::{CompletionRequest, CompletionServiceError, TextCompletion};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for [`OpenAiHttpCompletion`].
#[derive(Clone)]
pub struct CompletionSettings {
    pub base_url: Url,
    pub api_key: Zeroizing<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl CompletionSettings {
    /// Settings for the public OpenAI endpoint with the default model.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in URL; the `Result` mirrors [`Url::parse`].
    pub fn openai(api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key.into()),
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Completion adapter posting to `{base_url}/chat/completions`.
pub struct OpenAiHttpCompletion {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    model: String,
    temperature: f32,
}

impl OpenAiHttpCompletion {
    /// Build the adapter with a client bound to the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionServiceError::Transport`] when the endpoint URL
    /// cannot be derived or the reqwest client cannot be constructed.
    pub fn new(settings: CompletionSettings) -> Result<Self, CompletionServiceError> {
        let endpoint = chat_endpoint(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| CompletionServiceError::transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_key: settings.api_key,
            model: settings.model,
            temperature: settings.temperature,
        })
    }
}

fn chat_endpoint(base_url: &Url) -> Result<Url, CompletionServiceError> {
    let joined = format!("{}/chat/completions", base_url.as_str().trim_end_matches('/'));
    Url::parse(&joined)
        .map_err(|err| CompletionServiceError::transport(format!("invalid base URL: {err}")))
}

#[async_trait]
impl TextCompletion for OpenAiHttpCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionServiceError> {
        let body = ChatRequestDto {
            model: &self.model,
            messages: [
                ChatMessageDto {
                    role: "system",
                    content: &request.system,
                },
                ChatMessageDto {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let err = map_status_error(status, bytes.as_ref());
            warn!(status = status.as_u16(), error = %err, "completion request rejected");
            return Err(err);
        }

        let content = parse_content(bytes.as_ref())?;
        debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }
}

fn parse_content(body: &[u8]) -> Result<String, CompletionServiceError> {
    let decoded: ChatResponseDto = serde_json::from_slice(body)
        .map_err(|err| CompletionServiceError::decode(format!("invalid response JSON: {err}")))?;
    decoded
        .into_first_content()
        .ok_or_else(|| CompletionServiceError::decode("response contained no choices"))
}

fn map_transport_error(error: reqwest::Error) -> CompletionServiceError {
    if error.is_timeout() {
        CompletionServiceError::transport(format!("request timed out: {error}"))
    } else {
        CompletionServiceError::transport(error.to_string())
    }
}

/// Condense a failure body, preferring the OpenAI error envelope's message.
fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionServiceError {
    let message = match serde_json::from_slice::<ErrorEnvelopeDto>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => match envelope.error.kind {
            Some(kind) if !kind.is_empty() => format!("{kind}: {}", envelope.error.message),
            _ => envelope.error.message,
        },
        _ => body_preview(body),
    };
    CompletionServiceError::upstream(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
