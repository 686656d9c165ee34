//! Text-completion outbound adapters.
//!
//! [`OpenAiHttpCompletion`] talks to any OpenAI-compatible
//! `/chat/completions` endpoint. [`DisabledCompletion`] stands in when no
//! API key is configured so the rest of the API keeps working.

mod disabled;
mod dto;
mod openai_http;

pub use disabled::DisabledCompletion;
pub use openai_http::{CompletionSettings, OpenAiHttpCompletion};
