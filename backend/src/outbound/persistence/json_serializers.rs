//! JSONB encode and decode helpers for outbound Diesel adapters.
//!
//! Roadmap documents are stored with the timeline as an ordered array of
//! `{"month", "items"}` objects. PostgreSQL `jsonb` does not keep object key
//! order, so storing the timeline as the object the completion service
//! returns would lose the month order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{RoadmapDocument, Timeline};

#[derive(Debug, Serialize, Deserialize)]
struct StoredMonth {
    month: String,
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRoadmap {
    #[serde(default)]
    skills_to_learn: Vec<String>,
    #[serde(default)]
    projects_to_build: Vec<String>,
    #[serde(default)]
    certifications: Vec<String>,
    #[serde(default)]
    timeline: Vec<StoredMonth>,
}

pub(super) fn roadmap_document_to_json(document: &RoadmapDocument) -> Result<Value, String> {
    let stored = StoredRoadmap {
        skills_to_learn: document.skills_to_learn.clone(),
        projects_to_build: document.projects_to_build.clone(),
        certifications: document.certifications.clone(),
        timeline: document
            .timeline
            .months()
            .iter()
            .map(|(month, items)| StoredMonth {
                month: month.clone(),
                items: items.clone(),
            })
            .collect(),
    };
    serde_json::to_value(stored).map_err(|err| format!("roadmap encode: {err}"))
}

/// Decode a stored roadmap, restoring the month order from the array.
pub(super) fn json_to_roadmap_document(value: Value) -> Result<RoadmapDocument, String> {
    let stored: StoredRoadmap =
        serde_json::from_value(value).map_err(|err| format!("roadmap decode: {err}"))?;
    Ok(RoadmapDocument {
        skills_to_learn: stored.skills_to_learn,
        projects_to_build: stored.projects_to_build,
        certifications: stored.certifications,
        timeline: Timeline::new(
            stored
                .timeline
                .into_iter()
                .map(|month| (month.month, month.items))
                .collect(),
        ),
    })
}

pub(super) fn suggestions_to_json(suggestions: &[String]) -> Value {
    Value::Array(suggestions.iter().cloned().map(Value::String).collect())
}

pub(super) fn json_to_suggestions(value: Value) -> Result<Vec<String>, String> {
    serde_json::from_value(value).map_err(|err| format!("suggestions decode: {err}"))
}
