//! Style Selection - Category Presets and Modifiers
//!
//! Unmatched lookups fall back to the first preset of the category,
//! or "<category> style" when the category has none.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merge::present;
use crate::presets::PresetLibrary;

pub const CUSTOM: &str = "Custom";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSpec {
    pub category: String,
    pub preset: Option<String>,
    pub custom_style: Option<String>,
    pub quality_level: Option<String>,
    pub additional_modifiers: Option<String>,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            category: "Photorealistic".to_string(),
            preset: None,
            custom_style: None,
            quality_level: None,
            additional_modifiers: None,
        }
    }
}

pub fn select_style(spec: &StyleSpec, library: &PresetLibrary) -> String {
    let mut style = if spec.category == CUSTOM {
        present(spec.custom_style.as_deref())
            .unwrap_or("Professional rendering")
            .to_string()
    } else {
        preset_for(&spec.category, spec.preset.as_deref(), library)
    };

    if let Some(quality) = present(spec.quality_level.as_deref()) {
        style = format!("{}, {}", style, quality.to_lowercase());
    }
    if let Some(modifiers) = present(spec.additional_modifiers.as_deref()) {
        style = format!("{}, {}", style, modifiers);
    }

    style
}

/// First preset containing `wanted` (case-insensitive). A leading
/// "<category>: " label on `wanted` is ignored.
fn preset_for(category: &str, wanted: Option<&str>, library: &PresetLibrary) -> String {
    let presets = library.style_presets(category);
    let Some(first) = presets.first() else {
        return format!("{} style", category);
    };

    let Some(wanted) = present(wanted) else {
        return first.clone();
    };

    let label = format!("{}:", category);
    let needle = wanted
        .strip_prefix(label.as_str())
        .map(str::trim)
        .unwrap_or(wanted)
        .to_lowercase();

    match presets.iter().find(|p| p.to_lowercase().contains(&needle)) {
        Some(found) => found.clone(),
        None => {
            debug!(category, preset = wanted, "no matching style preset, using first");
            first.clone()
        }
    }
}

/// Index-based selection. Returns the style and a listing of the category.
pub fn select_style_by_index(
    category: &str,
    index: usize,
    custom_override: Option<&str>,
    quality_suffix: Option<&str>,
    library: &PresetLibrary,
) -> (String, String) {
    let with_suffix = |style: &str| match present(quality_suffix) {
        Some(suffix) => format!("{}, {}", style, suffix),
        None => style.to_string(),
    };

    if let Some(custom) = present(custom_override) {
        return (with_suffix(custom), "Custom style".to_string());
    }

    let presets = library.style_presets(category);
    if presets.is_empty() {
        return (format!("{} style", category), "No presets available".to_string());
    }

    let style = with_suffix(presets[index.min(presets.len() - 1)].as_str());
    let listing = presets
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.chars().count() > 60 {
                format!("{}: {}...", i, p.chars().take(60).collect::<String>())
            } else {
                format!("{}: {}", i, p)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    (style, listing)
}
