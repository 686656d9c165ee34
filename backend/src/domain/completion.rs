//! Parsing of text returned by the completion service.
//!
//! The model is asked for bare JSON but frequently wraps it in Markdown code
//! fences. [`parse_completion`] strips those, deserialises the remainder into a
//! typed payload and runs the payload's [`CompletionSchema::validate`] check.
//! Any failure yields a [`CompletionParseError`] that keeps the raw text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, RoadmapDocument};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Completion text that could not be turned into the expected payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("completion was not valid JSON for the expected payload: {reason}")]
pub struct CompletionParseError {
    pub raw: String,
    pub reason: String,
}

impl From<CompletionParseError> for Error {
    fn from(value: CompletionParseError) -> Self {
        Error::completion_parse_failure("AI returned invalid JSON", value.raw.clone())
            .with_details(json!({ "raw": value.raw, "reason": value.reason }))
    }
}

/// A payload the completion service is asked to produce.
pub trait CompletionSchema: DeserializeOwned {
    /// Reject payloads that parsed but are unusable.
    fn validate(&self) -> Result<(), String>;
}

/// Remove every ```` ```json ```` (any case) and ```` ``` ```` marker, then trim.
///
/// # Examples
/// ```
/// use backend::domain::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```JSON\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
/// ```
pub fn strip_code_fences(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(FENCE) {
        cleaned.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if rest
            .get(..JSON_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        {
            rest = &rest[JSON_TAG.len()..];
        }
    }
    cleaned.push_str(rest);
    cleaned.trim().to_owned()
}

/// Strip fences, deserialise and validate a completion payload.
pub fn parse_completion<T: CompletionSchema>(raw: &str) -> Result<T, CompletionParseError> {
    let failure = |reason: String| CompletionParseError {
        raw: raw.to_owned(),
        reason,
    };
    let cleaned = strip_code_fences(raw);
    let payload: T = serde_json::from_str(&cleaned).map_err(|err| failure(err.to_string()))?;
    payload.validate().map_err(failure)?;
    Ok(payload)
}

/// Summary and suggestions attached to a single check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationPayload {
    pub summary: String,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_insight: Option<String>,
}

impl CompletionSchema for AnnotationPayload {
    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary must not be blank".into());
        }
        if self.suggestions.is_empty() {
            return Err("suggestions must not be empty".into());
        }
        Ok(())
    }
}

/// Aggregate insights over a week of check-ins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsights {
    pub weekly_summary: String,
    #[serde(default)]
    pub mood_analysis: String,
    #[serde(default)]
    pub progress_achievements: Vec<String>,
    #[serde(default)]
    pub recurring_challenges: Vec<String>,
    #[serde(default)]
    pub next_week_recommendations: Vec<String>,
}

impl CompletionSchema for WeeklyInsights {
    fn validate(&self) -> Result<(), String> {
        if self.weekly_summary.trim().is_empty() {
            return Err("weeklySummary must not be blank".into());
        }
        Ok(())
    }
}

/// Generated tasks for today.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodayTasksPayload {
    pub tasks: Vec<String>,
}

impl TodayTasksPayload {
    /// Trimmed task texts with blanks removed.
    pub fn into_tasks(self) -> Vec<String> {
        self.tasks
            .into_iter()
            .map(|task| task.trim().to_owned())
            .filter(|task| !task.is_empty())
            .collect()
    }
}

impl CompletionSchema for TodayTasksPayload {
    fn validate(&self) -> Result<(), String> {
        if self.tasks.iter().all(|task| task.trim().is_empty()) {
            return Err("tasks must contain at least one non-blank entry".into());
        }
        Ok(())
    }
}

impl CompletionSchema for RoadmapDocument {
    fn validate(&self) -> Result<(), String> {
        if self.item_count() == 0 {
            return Err("roadmap must contain at least one item".into());
        }
        Ok(())
    }
}
