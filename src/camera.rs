//! Camera Records - Sparse Camera Parameters
//!
//! A record only carries populated keys. Presets seed a record,
//! explicit fields always overwrite.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::PromptError;
use crate::merge::{merge_numeric, merge_record, merge_scalar, present, Overlay, UNSET_ISO, UNSET_LENS_MM};
use crate::presets::PresetLibrary;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CameraRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
    #[serde(rename = "lens-mm", skip_serializing_if = "Option::is_none")]
    pub lens_mm: Option<u32>,
    #[serde(rename = "f-number", skip_serializing_if = "Option::is_none")]
    pub f_number: Option<String>,
    #[serde(rename = "ISO", skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_of_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraField {
    Angle,
    Distance,
    Lens,
    LensMm,
    FNumber,
    Iso,
    DepthOfField,
    Focus,
}

impl CameraField {
    /// Canonical output key.
    pub fn key(self) -> &'static str {
        match self {
            CameraField::Angle => "angle",
            CameraField::Distance => "distance",
            CameraField::Lens => "lens",
            CameraField::LensMm => "lens-mm",
            CameraField::FNumber => "f-number",
            CameraField::Iso => "ISO",
            CameraField::DepthOfField => "depth_of_field",
            CameraField::Focus => "focus",
        }
    }
}

/// Every accepted external name and the canonical field it maps to.
const FIELD_ALIASES: &[(&str, CameraField)] = &[
    ("angle", CameraField::Angle),
    ("distance", CameraField::Distance),
    ("lens", CameraField::Lens),
    ("lens_description", CameraField::Lens),
    ("lens-mm", CameraField::LensMm),
    ("lens_mm", CameraField::LensMm),
    ("f-number", CameraField::FNumber),
    ("f_number", CameraField::FNumber),
    ("ISO", CameraField::Iso),
    ("iso", CameraField::Iso),
    ("depth_of_field", CameraField::DepthOfField),
    ("depth-of-field", CameraField::DepthOfField),
    ("focus", CameraField::Focus),
];

pub fn resolve_field(name: &str) -> Option<CameraField> {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, field)| *field)
}

impl CameraRecord {
    /// Build from loosely named fields. Unknown keys are ignored; a numeric
    /// `0` is the unset sentinel.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, PromptError> {
        let mut record = Self::default();

        for (name, value) in fields {
            let Some(field) = resolve_field(name) else {
                debug!(field = %name, "ignoring unknown camera field");
                continue;
            };

            match field {
                CameraField::LensMm => set(&mut record.lens_mm, numeric_value(field, value)?),
                CameraField::Iso => set(&mut record.iso, numeric_value(field, value)?),
                CameraField::Angle => set(&mut record.angle, text_value(field.key(), value)?),
                CameraField::Distance => set(&mut record.distance, text_value(field.key(), value)?),
                CameraField::Lens => set(&mut record.lens, text_value(field.key(), value)?),
                CameraField::FNumber => set(&mut record.f_number, text_value(field.key(), value)?),
                CameraField::DepthOfField => set(&mut record.depth_of_field, text_value(field.key(), value)?),
                CameraField::Focus => set(&mut record.focus, text_value(field.key(), value)?),
            }
        }

        Ok(record)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge a preset with explicit overrides.
    pub fn build(preset: Option<&CameraRecord>, overrides: &CameraOverrides, override_preset: bool) -> Self {
        merge_record(preset, &overrides.to_record(), override_preset)
    }

    /// Display lines, one per populated field in fixed order.
    pub fn summarize(&self, preset_name: Option<&str>) -> Vec<String> {
        let mut lines = vec![];

        if let Some(name) = preset_name {
            lines.push(format!("Preset: {}", name));
        }
        if let Some(angle) = &self.angle {
            lines.push(format!("Angle: {}", angle));
        }
        if let Some(distance) = &self.distance {
            lines.push(format!("Distance: {}", distance));
        }
        if let Some(mm) = self.lens_mm {
            lines.push(format!("Lens: {}mm", mm));
        } else if let Some(lens) = &self.lens {
            lines.push(format!("Lens: {}", lens));
        }
        if let Some(f) = &self.f_number {
            lines.push(format!("Aperture: {}", f));
        }
        if let Some(iso) = self.iso {
            lines.push(format!("ISO: {}", iso));
        }
        if let Some(dof) = &self.depth_of_field {
            lines.push(format!("DOF: {}", dof));
        }

        if lines.is_empty() {
            lines.push("No camera parameters set".to_string());
        }
        lines
    }
}

impl Overlay for CameraRecord {
    fn overlay(&mut self, explicit: &Self) {
        set(&mut self.angle, explicit.angle.clone());
        set(&mut self.distance, explicit.distance.clone());
        set(&mut self.lens, explicit.lens.clone());
        set(&mut self.lens_mm, explicit.lens_mm);
        set(&mut self.f_number, explicit.f_number.clone());
        set(&mut self.iso, explicit.iso);
        set(&mut self.depth_of_field, explicit.depth_of_field.clone());
        set(&mut self.focus, explicit.focus.clone());
    }
}

impl TryFrom<Map<String, Value>> for CameraRecord {
    type Error = PromptError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Self::from_fields(&fields)
    }
}

/// Replace `slot` only when `value` is populated.
fn set<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

fn text_value(key: &str, value: &Value) -> Result<Option<String>, PromptError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(present(Some(s.as_str())).map(str::to_string)),
        _ => Err(PromptError::invalid_field(key, "expected a string")),
    }
}

fn numeric_value(field: CameraField, value: &Value) -> Result<Option<u32>, PromptError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let v = n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| PromptError::invalid_field(field.key(), "expected a non-negative integer"))?;
            let sentinel = if field == CameraField::Iso { UNSET_ISO } else { UNSET_LENS_MM };
            Ok(merge_numeric(None, v, sentinel))
        }
        _ => Err(PromptError::invalid_field(field.key(), "expected a non-negative integer")),
    }
}

/// Explicit camera inputs. Free text beats the matching dropdown value;
/// `lens_mm` and `iso` use `0` for "not provided".
///
/// Field names are resolved through the same alias table as
/// [`CameraRecord::from_fields`], so a later alias wins over an earlier one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CameraOverrides {
    pub angle: Option<String>,
    pub angle_preset: Option<String>,
    pub distance: Option<String>,
    pub distance_preset: Option<String>,
    pub lens: Option<String>,
    pub lens_mm: u32,
    pub f_number: Option<String>,
    pub iso: u32,
    pub depth_of_field: Option<String>,
    pub depth_preset: Option<String>,
    pub focus: Option<String>,
}

impl TryFrom<Map<String, Value>> for CameraOverrides {
    type Error = PromptError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut overrides = Self::default();

        for (name, value) in &fields {
            match name.as_str() {
                "angle_preset" => set(&mut overrides.angle_preset, text_value(name, value)?),
                "distance_preset" => set(&mut overrides.distance_preset, text_value(name, value)?),
                "depth_preset" => set(&mut overrides.depth_preset, text_value(name, value)?),
                _ => {
                    let Some(field) = resolve_field(name) else {
                        debug!(field = %name, "ignoring unknown camera override");
                        continue;
                    };
                    match field {
                        CameraField::LensMm => {
                            if let Some(mm) = numeric_value(field, value)? {
                                overrides.lens_mm = mm;
                            }
                        }
                        CameraField::Iso => {
                            if let Some(iso) = numeric_value(field, value)? {
                                overrides.iso = iso;
                            }
                        }
                        CameraField::Angle => set(&mut overrides.angle, text_value(field.key(), value)?),
                        CameraField::Distance => set(&mut overrides.distance, text_value(field.key(), value)?),
                        CameraField::Lens => set(&mut overrides.lens, text_value(field.key(), value)?),
                        CameraField::FNumber => set(&mut overrides.f_number, text_value(field.key(), value)?),
                        CameraField::DepthOfField => {
                            set(&mut overrides.depth_of_field, text_value(field.key(), value)?)
                        }
                        CameraField::Focus => set(&mut overrides.focus, text_value(field.key(), value)?),
                    }
                }
            }
        }

        Ok(overrides)
    }
}

impl CameraOverrides {
    /// The explicit-only record, before any preset seeding.
    pub fn to_record(&self) -> CameraRecord {
        CameraRecord {
            angle: merge_scalar(self.angle_preset.as_deref(), self.angle.as_deref()),
            distance: merge_scalar(self.distance_preset.as_deref(), self.distance.as_deref()),
            lens: merge_scalar(None, self.lens.as_deref()),
            lens_mm: merge_numeric(None, self.lens_mm, UNSET_LENS_MM),
            f_number: merge_scalar(None, self.f_number.as_deref()),
            iso: merge_numeric(None, self.iso, UNSET_ISO),
            depth_of_field: merge_scalar(self.depth_preset.as_deref(), self.depth_of_field.as_deref()),
            focus: merge_scalar(None, self.focus.as_deref()),
        }
    }
}

/// A camera rig request: optional named preset plus explicit fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    pub preset: Option<String>,
    pub override_preset: bool,
    #[serde(flatten)]
    pub fields: CameraOverrides,
}

impl CameraSpec {
    /// Resolve against a library, returning the record and its summary lines.
    pub fn resolve(&self, library: &PresetLibrary) -> (CameraRecord, Vec<String>) {
        let name = present(self.preset.as_deref()).filter(|n| *n != "None");
        let preset = name.and_then(|n| {
            let found = library.camera_preset(n);
            if found.is_none() {
                warn!(preset = n, "unknown camera preset");
            }
            found
        });

        let record = CameraRecord::build(preset, &self.fields, self.override_preset);
        let seeded = preset.is_some() && !self.override_preset;
        let summary = record.summarize(if seeded { name } else { None });
        (record, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_overrides_preset_field() {
        let preset = CameraRecord { lens_mm: Some(85), ..Default::default() };
        let overrides = CameraOverrides { lens_mm: 50, ..Default::default() };
        let record = CameraRecord::build(Some(&preset), &overrides, false);
        assert_eq!(record, CameraRecord { lens_mm: Some(50), ..Default::default() });
    }

    #[test]
    fn test_override_flag_ignores_preset() {
        let library = PresetLibrary::builtin();
        let spec = CameraSpec {
            preset: Some("Portrait".to_string()),
            override_preset: true,
            fields: CameraOverrides { iso: 800, ..Default::default() },
        };
        let (record, summary) = spec.resolve(library);
        assert_eq!(record, CameraRecord { iso: Some(800), ..Default::default() });
        assert_eq!(summary, vec!["ISO: 800"]);
    }

    #[test]
    fn test_free_text_beats_dropdown_beats_preset() {
        let library = PresetLibrary::builtin();
        let spec = CameraSpec {
            preset: Some("Portrait".to_string()),
            override_preset: false,
            fields: CameraOverrides {
                angle: Some("Over the shoulder".to_string()),
                angle_preset: Some("High angle".to_string()),
                distance_preset: Some("Close-up".to_string()),
                depth_of_field: Some("   ".to_string()),
                depth_preset: Some("Deep".to_string()),
                ..Default::default()
            },
        };
        let (record, summary) = spec.resolve(library);
        assert_eq!(record.angle.as_deref(), Some("Over the shoulder"));
        assert_eq!(record.distance.as_deref(), Some("Close-up"));
        assert_eq!(record.depth_of_field.as_deref(), Some("Deep"));
        assert_eq!(record.lens_mm, Some(85));
        assert_eq!(record.focus.as_deref(), Some("Sharp focus on subject's eyes"));
        assert_eq!(summary[0], "Preset: Portrait");
        assert_eq!(summary[3], "Lens: 85mm");
    }

    #[test]
    fn test_unknown_preset_is_not_used() {
        let spec = CameraSpec { preset: Some("Fisheye".to_string()), ..Default::default() };
        let (record, summary) = spec.resolve(PresetLibrary::builtin());
        assert!(record.is_empty());
        assert_eq!(summary, vec!["No camera parameters set"]);
    }

    #[test]
    fn test_summary_falls_back_to_lens_description() {
        let record = CameraRecord { lens: Some("Macro lens".to_string()), ..Default::default() };
        assert_eq!(record.summarize(None), vec!["Lens: Macro lens"]);
    }

    #[test]
    fn test_alias_resolution() {
        let record = CameraRecord::from_fields(
            json!({"lens_mm": 35, "f_number": "f/1.8", "iso": 0, "bogus": true, "angle": " Low angle "})
                .as_object()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(record.lens_mm, Some(35));
        assert_eq!(record.f_number.as_deref(), Some("f/1.8"));
        assert_eq!(record.iso, None);
        assert_eq!(record.angle.as_deref(), Some("Low angle"));
    }

    #[test]
    fn test_alias_wrong_type_is_error() {
        let err = CameraRecord::from_fields(json!({"lens-mm": "85"}).as_object().unwrap()).unwrap_err();
        assert!(err.to_string().contains("lens-mm"));
    }

    #[test]
    fn test_serialized_keys_are_sparse_and_canonical() {
        let record = CameraRecord {
            angle: Some("Eye level".to_string()),
            lens_mm: Some(85),
            f_number: Some("f/2.0".to_string()),
            iso: Some(200),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"angle":"Eye level","lens-mm":85,"f-number":"f/2.0","ISO":200}"#
        );
    }

    #[test]
    fn test_overrides_accept_external_names() {
        let overrides: CameraOverrides =
            serde_json::from_value(json!({"lens-mm": 50, "ISO": 100, "lens_description": "Prime"})).unwrap();
        let record = overrides.to_record();
        assert_eq!(record.lens_mm, Some(50));
        assert_eq!(record.iso, Some(100));
        assert_eq!(record.lens.as_deref(), Some("Prime"));
    }

    #[test]
    fn test_overrides_share_alias_table_with_records() {
        let fields = json!({"depth-of-field": "Shallow", "lens_mm": 50, "lens-mm": 35, "angle_preset": "Low angle"});
        let overrides: CameraOverrides = serde_json::from_value(fields.clone()).unwrap();
        let record = CameraRecord::from_fields(fields.as_object().unwrap()).unwrap();

        assert_eq!(overrides.to_record().depth_of_field, record.depth_of_field);
        assert_eq!(overrides.to_record().lens_mm, Some(35));
        assert_eq!(record.lens_mm, Some(35));
        assert_eq!(overrides.to_record().angle.as_deref(), Some("Low angle"));
    }

    #[test]
    fn test_overrides_flattened_into_spec() {
        let spec: CameraSpec = serde_json::from_value(json!({
            "preset": "Portrait",
            "override_preset": true,
            "depth-of-field": "Shallow",
            "iso": 0,
        }))
        .unwrap();
        assert!(spec.override_preset);
        let (record, _) = spec.resolve(PresetLibrary::builtin());
        assert_eq!(record, CameraRecord { depth_of_field: Some("Shallow".to_string()), ..Default::default() });
    }

    #[test]
    fn test_override_wrong_type_is_error() {
        let result = serde_json::from_value::<CameraOverrides>(json!({"ISO": "800"}));
        assert!(result.unwrap_err().to_string().contains("ISO"));
    }
}
