//! Prompt Documents - Assembly, Pruning, Serialization
//!
//! Top-level keys are always emitted in canonical order. A key is present
//! only when its value is non-empty after pruning.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::camera::CameraRecord;
use crate::color::ColorPalette;
use crate::error::PromptError;
use crate::subject::SubjectRecord;

/// Canonical emission order of the recognized top-level slots.
pub const CANONICAL_ORDER: [&str; 9] = [
    "scene",
    "subjects",
    "style",
    "color_palette",
    "lighting",
    "mood",
    "background",
    "composition",
    "camera",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptDocument(Map<String, Value>);

impl PromptDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for PromptDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Typed top-level fragments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptFields {
    pub scene: Option<String>,
    pub subjects: Vec<SubjectRecord>,
    pub style: Option<String>,
    pub color_palette: Option<ColorPalette>,
    pub lighting: Option<String>,
    pub mood: Option<String>,
    pub background: Option<String>,
    pub composition: Option<String>,
    pub camera: Option<CameraRecord>,
}

impl PromptFields {
    pub fn assemble(&self) -> Result<PromptDocument, PromptError> {
        let mut slots = Map::new();
        slots.insert("scene".into(), serde_json::to_value(&self.scene)?);
        slots.insert("subjects".into(), serde_json::to_value(&self.subjects)?);
        slots.insert("style".into(), serde_json::to_value(&self.style)?);
        slots.insert("color_palette".into(), serde_json::to_value(&self.color_palette)?);
        slots.insert("lighting".into(), serde_json::to_value(&self.lighting)?);
        slots.insert("mood".into(), serde_json::to_value(&self.mood)?);
        slots.insert("background".into(), serde_json::to_value(&self.background)?);
        slots.insert("composition".into(), serde_json::to_value(&self.composition)?);
        slots.insert("camera".into(), serde_json::to_value(&self.camera)?);
        Ok(assemble(slots))
    }
}

/// Place recognized slots in canonical order, skipping empty values.
/// Strings are trimmed; unknown slot names are dropped.
pub fn assemble<I>(slots: I) -> PromptDocument
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut supplied: Map<String, Value> = Map::new();
    for (name, value) in slots {
        if CANONICAL_ORDER.contains(&name.as_str()) {
            supplied.insert(name, value);
        } else {
            debug!(slot = %name, "ignoring unrecognized slot");
        }
    }

    let mut document = Map::new();
    for key in CANONICAL_ORDER {
        let Some(value) = supplied.remove(key) else {
            continue;
        };
        let value = match value {
            Value::String(s) => Value::String(s.trim().to_string()),
            other => other,
        };
        if !is_empty_value(&value) {
            document.insert(key.to_string(), value);
        }
    }

    PromptDocument(document)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Recursively drop null, blank-string and empty-array values. Records
/// that become empty are dropped too. Idempotent.
pub fn prune(document: &PromptDocument) -> PromptDocument {
    let pruned = prune_map(document.0.clone());
    debug!(before = document.len(), after = pruned.len(), "pruned document");
    PromptDocument(pruned)
}

/// Prune a single value; `None` means it is empty and should be removed.
pub fn prune_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => prune_array(items).map(Value::Array),
        Value::Object(map) => {
            let map = prune_map(map);
            if map.is_empty() {
                None
            } else {
                Some(Value::Object(map))
            }
        }
        other => Some(other),
    }
}

fn prune_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(k, v)| prune_value(v).map(|v| (k, v)))
        .collect()
}

/// Arrays of records are pruned element-wise; other arrays are kept as-is.
fn prune_array(items: Vec<Value>) -> Option<Vec<Value>> {
    if items.is_empty() {
        return None;
    }
    if !items.iter().all(Value::is_object) {
        return Some(items);
    }

    let records: Vec<Value> = items.into_iter().filter_map(prune_value).collect();
    if records.is_empty() {
        None
    } else {
        Some(records)
    }
}

/// JSON text in insertion order; non-ASCII passes through unescaped.
pub fn serialize(document: &PromptDocument, pretty: bool) -> Result<String, PromptError> {
    let text = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slots(value: Value) -> Vec<(String, Value)> {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => vec![],
        }
    }

    #[test]
    fn test_assemble_canonical_order() {
        let doc = assemble(slots(json!({
            "camera": {"angle": "Eye level"},
            "mood": " calm ",
            "scene": "Studio",
            "unknown": "x",
        })));
        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, vec!["scene", "mood", "camera"]);
        assert_eq!(doc.get("mood"), Some(&json!("calm")));
    }

    #[test]
    fn test_assemble_skips_empty() {
        let doc = assemble(slots(json!({
            "scene": "   ",
            "subjects": [],
            "camera": {},
            "color_palette": null,
            "style": "Photorealistic",
        })));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["style"]);
    }

    #[test]
    fn test_prune_nested() {
        let doc = PromptDocument::from(json!({"a": "", "b": {"c": ""}, "d": [1]}).as_object().unwrap().clone());
        assert_eq!(prune(&doc).into_value(), json!({"d": [1]}));
    }

    #[test]
    fn test_prune_array_of_records() {
        let doc = PromptDocument::from(
            json!({
                "subjects": [{"description": "mug", "pose": ""}, {"pose": null}],
                "empty_records": [{"x": []}],
                "mixed": ["", {"a": ""}],
            })
            .as_object()
            .unwrap()
            .clone(),
        );
        assert_eq!(
            prune(&doc).into_value(),
            json!({"subjects": [{"description": "mug"}], "mixed": ["", {"a": ""}]})
        );
    }

    #[test]
    fn test_prune_idempotent() {
        let doc = PromptDocument::from(
            json!({"a": {"b": {"c": [{"d": ""}]}, "e": 0, "f": false}, "g": "  "})
                .as_object()
                .unwrap()
                .clone(),
        );
        let once = prune(&doc);
        assert_eq!(prune(&once), once);
        assert_eq!(once.into_value(), json!({"a": {"e": 0, "f": false}}));
    }

    #[test]
    fn test_serialize_pretty_and_compact() {
        let doc = assemble(slots(json!({"scene": "Café terrace", "mood": "calm"})));
        assert_eq!(serialize(&doc, false).unwrap(), r#"{"scene":"Café terrace","mood":"calm"}"#);
        assert_eq!(
            serialize(&doc, true).unwrap(),
            "{\n  \"scene\": \"Café terrace\",\n  \"mood\": \"calm\"\n}"
        );
    }

    #[test]
    fn test_typed_fields_assemble() {
        let fields = PromptFields {
            style: Some(" Photorealistic ".to_string()),
            color_palette: Some(ColorPalette::from_candidates(["fff"])),
            camera: Some(CameraRecord::default()),
            ..Default::default()
        };
        let doc = fields.assemble().unwrap();
        assert_eq!(doc.into_value(), json!({"style": "Photorealistic", "color_palette": ["#FFF"]}));
    }
}
