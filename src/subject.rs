//! Subjects - Single Records and Slot Collections

use serde::{Deserialize, Serialize};

use crate::color::resolve_subject_colors;
use crate::error::PromptError;
use crate::merge::present;

/// Number of named subject slots a collection accepts.
pub const SUBJECT_SLOTS: usize = 8;

/// A validated subject. Deserialization runs the same checks as
/// [`build_subject`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSubject")]
pub struct SubjectRecord {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub color_palette: Vec<String>,
}

/// Wire shape of a subject record before validation.
#[derive(Deserialize)]
struct RawSubject {
    #[serde(default)]
    description: String,
    position: Option<String>,
    action: Option<String>,
    pose: Option<String>,
    #[serde(default)]
    color_palette: Vec<String>,
}

impl TryFrom<RawSubject> for SubjectRecord {
    type Error = PromptError;

    fn try_from(raw: RawSubject) -> Result<Self, Self::Error> {
        build_subject(&SubjectSpec {
            description: raw.description,
            position: raw.position,
            action: raw.action,
            pose: raw.pose,
            colors: raw.color_palette,
            ..Default::default()
        })
    }
}

/// Position helper vocabulary, joined horizontal, vertical, depth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionParts {
    pub horizontal: Option<String>,
    pub vertical: Option<String>,
    pub depth: Option<String>,
}

impl PositionParts {
    pub fn compose(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.horizontal, &self.vertical, &self.depth]
            .into_iter()
            .filter_map(|p| present(p.as_deref()))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Raw subject inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectSpec {
    pub description: String,
    /// Manual position, wins over `position_parts`
    pub position: Option<String>,
    pub position_parts: PositionParts,
    pub action: Option<String>,
    pub pose: Option<String>,
    pub colors: Vec<String>,
}

impl SubjectSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

pub fn build_subject(spec: &SubjectSpec) -> Result<SubjectRecord, PromptError> {
    let description = spec.description.trim();
    if description.is_empty() {
        return Err(PromptError::Validation("Subject description is required".to_string()));
    }

    let position = present(spec.position.as_deref())
        .map(str::to_string)
        .or_else(|| spec.position_parts.compose());

    Ok(SubjectRecord {
        description: description.to_string(),
        position,
        action: present(spec.action.as_deref()).map(str::to_string),
        pose: present(spec.pose.as_deref()).map(str::to_string),
        color_palette: resolve_subject_colors(&spec.colors),
    })
}

/// Ordered subjects, optionally tagged with the priority they were sorted by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectCollection {
    entries: Vec<(SubjectRecord, Option<i32>)>,
    sorted: bool,
}

impl SubjectCollection {
    pub fn subjects(&self) -> impl Iterator<Item = &SubjectRecord> {
        self.entries.iter().map(|(s, _)| s)
    }

    pub fn into_subjects(self) -> Vec<SubjectRecord> {
        self.entries.into_iter().map(|(s, _)| s).collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec!["No subjects provided".to_string()];
        }

        let mut lines = vec![format!("Total subjects: {}", self.entries.len())];
        if self.sorted {
            lines.push("(Sorted by priority)".to_string());
        }
        for (i, (subject, priority)) in self.entries.iter().enumerate() {
            let line = match priority {
                Some(p) => format!("{}. [P{}] {}", i + 1, p, truncate(&subject.description, 40)),
                None => format!("{}. {}", i + 1, truncate(&subject.description, 50)),
            };
            lines.push(line);
        }
        lines
    }
}

/// Non-absent slots in slot order.
pub fn collect<I>(slots: I) -> SubjectCollection
where
    I: IntoIterator<Item = Option<SubjectRecord>>,
{
    SubjectCollection {
        entries: slots.into_iter().flatten().map(|s| (s, None)).collect(),
        sorted: false,
    }
}

/// Slots paired with priorities. A missing priority defaults to the
/// 1-based slot number. Sorting is stable, so ties keep slot order.
pub fn collect_with_priority<I>(slots: I, priorities: &[i32], sort_by_priority: bool) -> SubjectCollection
where
    I: IntoIterator<Item = Option<SubjectRecord>>,
{
    let mut entries: Vec<(SubjectRecord, Option<i32>)> = slots
        .into_iter()
        .enumerate()
        .filter_map(|(i, slot)| {
            let priority = priorities.get(i).copied().unwrap_or(i as i32 + 1);
            slot.map(|s| (s, Some(priority)))
        })
        .collect();

    if sort_by_priority {
        entries.sort_by_key(|(_, p)| *p);
    }

    SubjectCollection {
        entries,
        sorted: sort_by_priority,
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(desc: &str) -> SubjectRecord {
        build_subject(&SubjectSpec::new(desc)).unwrap()
    }

    #[test]
    fn test_description_required() {
        let err = build_subject(&SubjectSpec::new("   ")).unwrap_err();
        assert!(matches!(err, PromptError::Validation(_)));
    }

    #[test]
    fn test_deserialize_requires_description() {
        let blank = serde_json::from_value::<SubjectRecord>(serde_json::json!({"description": "   "}));
        assert!(blank.unwrap_err().to_string().contains("description"));

        let missing = serde_json::from_value::<SubjectRecord>(serde_json::json!({"pose": "seated"}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_deserialize_matches_built_record() {
        let spec = SubjectSpec {
            pose: Some("seated".to_string()),
            colors: vec!["ff8800".into(), "navy blue".into()],
            ..SubjectSpec::new("cat")
        };
        let record = build_subject(&spec).unwrap();
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<SubjectRecord>(&text).unwrap(), record);
    }

    #[test]
    fn test_manual_position_wins() {
        let spec = SubjectSpec {
            position: Some(" Center foreground ".to_string()),
            position_parts: PositionParts {
                horizontal: Some("far left".to_string()),
                ..Default::default()
            },
            ..SubjectSpec::new("mug")
        };
        assert_eq!(build_subject(&spec).unwrap().position.as_deref(), Some("Center foreground"));
    }

    #[test]
    fn test_position_parts_fixed_order() {
        let spec = SubjectSpec {
            position_parts: PositionParts {
                horizontal: Some("left side".to_string()),
                vertical: None,
                depth: Some("background".to_string()),
            },
            ..SubjectSpec::new("plant")
        };
        assert_eq!(build_subject(&spec).unwrap().position.as_deref(), Some("left side background"));
    }

    #[test]
    fn test_no_position_is_absent() {
        let record = subject("laptop");
        assert_eq!(record.position, None);
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"description":"laptop"}"#);
    }

    #[test]
    fn test_colors_normalized_and_filtered() {
        let spec = SubjectSpec {
            colors: vec!["#000000".into(), "ff8800".into(), "navy blue".into(), "#12".into()],
            ..SubjectSpec::new("mug")
        };
        assert_eq!(build_subject(&spec).unwrap().color_palette, vec!["#000000", "#FF8800", "navy blue"]);
    }

    #[test]
    fn test_collect_preserves_slot_order() {
        let collection = collect([None, Some(subject("S1")), None, Some(subject("S2"))]);
        assert_eq!(collection.count(), 2);
        let names: Vec<_> = collection.subjects().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["S1", "S2"]);
    }

    #[test]
    fn test_priority_sort_is_stable() {
        let slots = [Some(subject("S1")), Some(subject("S2")), Some(subject("S3")), Some(subject("S4"))];
        let collection = collect_with_priority(slots, &[3, 1, 2, 1], true);
        let names: Vec<_> = collection.subjects().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["S2", "S4", "S3", "S1"]);
    }

    #[test]
    fn test_priority_unsorted_keeps_slot_order() {
        let slots = [Some(subject("S1")), None, Some(subject("S3"))];
        let collection = collect_with_priority(slots, &[5, 1, 1], false);
        let names: Vec<_> = collection.subjects().map(|s| s.description.as_str()).collect();
        assert_eq!(names, vec!["S1", "S3"]);
        assert_eq!(collection.summary()[1], "1. [P5] S1");
        assert_eq!(collection.summary()[2], "2. [P1] S3");
    }

    #[test]
    fn test_summary_truncates() {
        let long = "A".repeat(60);
        let collection = collect([Some(subject(&long))]);
        let summary = collection.summary();
        assert_eq!(summary[0], "Total subjects: 1");
        assert_eq!(summary[1], format!("1. {}...", "A".repeat(47)));
        assert_eq!(collect(Vec::<Option<SubjectRecord>>::new()).summary(), vec!["No subjects provided"]);
    }
}
