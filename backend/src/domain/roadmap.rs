//! Career roadmaps and per-item progress.
//!
//! A roadmap is an append-only document; the newest row is "the" roadmap for
//! its user. Progress rows reference roadmap entries by exact text match so
//! regenerated roadmaps pick up progress for entries that did not change.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::domain::UserId;

/// Month-by-month plan, kept in the order the months were written.
///
/// Month labels are unique. A repeated label is folded into its first
/// occurrence, appending items the month does not already list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline(Vec<(String, Vec<String>)>);

impl Timeline {
    pub fn new(months: Vec<(String, Vec<String>)>) -> Self {
        let mut timeline = Self(Vec::with_capacity(months.len()));
        for (month, items) in months {
            timeline.push_month(month, items);
        }
        timeline
    }

    fn push_month(&mut self, month: String, items: Vec<String>) {
        let Some((_, existing)) = self.0.iter_mut().find(|(label, _)| *label == month) else {
            self.0.push((month, items));
            return;
        };
        for item in items {
            if !existing.contains(&item) {
                existing.push(item);
            }
        }
    }

    pub fn months(&self) -> &[(String, Vec<String>)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Timeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (month, items) in &self.0 {
            map.serialize_entry(month, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMonths;

        impl<'de> Visitor<'de> for OrderedMonths {
            type Value = Timeline;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping month labels to lists of strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut timeline = Timeline(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((month, items)) = access.next_entry::<String, Vec<String>>()? {
                    timeline.push_month(month, items);
                }
                Ok(timeline)
            }
        }

        deserializer.deserialize_map(OrderedMonths)
    }
}

/// The structured roadmap produced by the completion service.
///
/// Missing sections deserialise as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocument {
    #[serde(default)]
    pub skills_to_learn: Vec<String>,
    #[serde(default)]
    pub projects_to_build: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub timeline: Timeline,
}

impl RoadmapDocument {
    /// Every entry of the roadmap with its item type, in document order.
    pub fn items(&self) -> impl Iterator<Item = (RoadmapItemType, &str)> + '_ {
        section(RoadmapItemType::Skill, &self.skills_to_learn)
            .chain(section(RoadmapItemType::Project, &self.projects_to_build))
            .chain(section(RoadmapItemType::Certification, &self.certifications))
            .chain(
                self.timeline
                    .0
                    .iter()
                    .flat_map(|(_, items)| section(RoadmapItemType::Timeline, items)),
            )
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }
}

fn section(
    kind: RoadmapItemType,
    list: &[String],
) -> impl Iterator<Item = (RoadmapItemType, &str)> + '_ {
    list.iter().map(move |item| (kind, item.as_str()))
}

/// Which roadmap section a progress row points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapItemType {
    Skill,
    Project,
    Certification,
    Timeline,
}

/// Error returned for an unrecognised item type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("item type must be one of skill, project, certification, timeline; got {0:?}")]
pub struct UnknownRoadmapItemType(pub String);

impl RoadmapItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Project => "project",
            Self::Certification => "certification",
            Self::Timeline => "timeline",
        }
    }
}

impl std::str::FromStr for RoadmapItemType {
    type Err = UnknownRoadmapItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skill" => Ok(Self::Skill),
            "project" => Ok(Self::Project),
            "certification" => Ok(Self::Certification),
            "timeline" => Ok(Self::Timeline),
            other => Err(UnknownRoadmapItemType(other.to_owned())),
        }
    }
}

impl fmt::Display for RoadmapItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roadmap {
    pub id: Uuid,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub document: RoadmapDocument,
}

/// Completion flag for one roadmap entry.
///
/// ## Invariants
/// - At most one row per `(user_id, item_type, item_name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapProgress {
    pub id: Uuid,
    pub user_id: UserId,
    pub item_type: RoadmapItemType,
    pub item_name: String,
    pub completed: bool,
}

/// Aggregate completion over a roadmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl CompletionSummary {
    /// Count roadmap entries with a completed progress row.
    ///
    /// `percent` truncates and is zero for an empty roadmap.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CompletionSummary, RoadmapDocument};
    ///
    /// let doc = RoadmapDocument {
    ///     skills_to_learn: vec!["Rust".into(), "SQL".into(), "Docker".into()],
    ///     ..RoadmapDocument::default()
    /// };
    /// let summary = CompletionSummary::compute(&doc, &[]);
    /// assert_eq!((summary.completed, summary.total, summary.percent), (0, 3, 0));
    /// ```
    pub fn compute(document: &RoadmapDocument, progress: &[RoadmapProgress]) -> Self {
        let done: HashSet<(RoadmapItemType, &str)> = progress
            .iter()
            .filter(|row| row.completed)
            .map(|row| (row.item_type, row.item_name.as_str()))
            .collect();

        let (completed, total) = document.items().fold((0, 0), |(completed, total), item| {
            (completed + usize::from(done.contains(&item)), total + 1)
        });

        let percent = if total == 0 {
            0
        } else {
            u8::try_from(completed * 100 / total).unwrap_or(100)
        };

        Self {
            completed,
            total,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn document() -> RoadmapDocument {
        serde_json::from_str(
            r#"{
                "skillsToLearn": ["Rust", "SQL"],
                "projectsToBuild": ["CLI tool"],
                "certifications": [],
                "timeline": {
                    "month3": ["Ship"],
                    "month1": ["Read the book"],
                    "month2": ["Rust"]
                }
            }"#,
        )
        .expect("valid roadmap")
    }

    fn progress(item_type: RoadmapItemType, name: &str, completed: bool) -> RoadmapProgress {
        RoadmapProgress {
            id: Uuid::new_v4(),
            user_id: UserId::random(),
            item_type,
            item_name: name.to_owned(),
            completed,
        }
    }

    #[rstest]
    fn timeline_keeps_emitted_order(document: RoadmapDocument) {
        let labels: Vec<_> = document
            .timeline
            .months()
            .iter()
            .map(|(month, _)| month.as_str())
            .collect();
        assert_eq!(labels, ["month3", "month1", "month2"]);

        let json = serde_json::to_string(&document.timeline).expect("serialise timeline");
        assert_eq!(
            json,
            r#"{"month3":["Ship"],"month1":["Read the book"],"month2":["Rust"]}"#
        );
    }

    #[rstest]
    fn repeated_months_fold_into_the_first() {
        let timeline: Timeline = serde_json::from_str(
            r#"{"month1":["Read"],"month2":["Build"],"month1":["Read","Ship"]}"#,
        )
        .expect("timeline with a repeated month");

        assert_eq!(
            timeline.months(),
            [
                ("month1".to_owned(), vec!["Read".to_owned(), "Ship".to_owned()]),
                ("month2".to_owned(), vec!["Build".to_owned()]),
            ]
        );

        let built = Timeline::new(vec![
            ("month1".into(), vec!["Read".into()]),
            ("month2".into(), vec!["Build".into()]),
            ("month1".into(), vec!["Ship".into()]),
        ]);
        assert_eq!(built, timeline);
    }

    #[rstest]
    fn missing_sections_default_to_empty() {
        let doc: RoadmapDocument =
            serde_json::from_str(r#"{"skillsToLearn": ["Go"]}"#).expect("partial roadmap");
        assert_eq!(doc.item_count(), 1);
        assert!(doc.timeline.is_empty());
    }

    #[rstest]
    fn summary_matches_type_and_exact_name(document: RoadmapDocument) {
        let rows = vec![
            progress(RoadmapItemType::Skill, "Rust", true),
            progress(RoadmapItemType::Skill, "rust", true),
            progress(RoadmapItemType::Project, "CLI tool", false),
            progress(RoadmapItemType::Timeline, "Rust", true),
        ];
        let summary = CompletionSummary::compute(&document, &rows);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.percent, 33);
    }

    #[rstest]
    fn empty_roadmap_reports_zero_percent() {
        let summary = CompletionSummary::compute(&RoadmapDocument::default(), &[]);
        assert_eq!(summary, CompletionSummary::default());
    }

    #[rstest]
    #[case("skill", Some(RoadmapItemType::Skill))]
    #[case("timeline", Some(RoadmapItemType::Timeline))]
    #[case("Skill", None)]
    #[case("course", None)]
    fn parses_item_types(#[case] raw: &str, #[case] expected: Option<RoadmapItemType>) {
        assert_eq!(raw.parse::<RoadmapItemType>().ok(), expected);
    }
}
