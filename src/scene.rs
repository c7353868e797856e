//! Scene descriptions from a scene type plus environmental context.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merge::present;
use crate::presets::PresetLibrary;

pub const CUSTOM: &str = "Custom";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSpec {
    /// Preset name, or "Custom" / absent for `custom_description`
    pub scene_type: Option<String>,
    pub custom_description: Option<String>,
    pub environment_details: Option<String>,
    pub time_of_day: Option<String>,
    pub custom_time_of_day: Option<String>,
    pub weather: Option<String>,
    pub custom_weather: Option<String>,
}

pub fn build_scene(spec: &SceneSpec, library: &PresetLibrary) -> String {
    let base = match present(spec.scene_type.as_deref()) {
        None | Some(CUSTOM) => present(spec.custom_description.as_deref())
            .unwrap_or("General scene")
            .to_string(),
        Some(name) => match library.scene(name) {
            Some(description) => description.to_string(),
            None => {
                debug!(scene_type = name, "unknown scene type");
                String::new()
            }
        },
    };

    let mut parts = vec![];
    if !base.is_empty() {
        parts.push(base);
    }
    if let Some(time) = pick_custom(&spec.time_of_day, &spec.custom_time_of_day) {
        parts.push(format!("{} lighting", time.to_lowercase()));
    }
    if let Some(weather) = pick_custom(&spec.weather, &spec.custom_weather) {
        parts.push(format!("{} conditions", weather.to_lowercase()));
    }
    if let Some(details) = present(spec.environment_details.as_deref()) {
        parts.push(details.to_string());
    }

    parts.join(", ")
}

/// A dropdown value, or its free-text companion when the dropdown says "Custom".
fn pick_custom<'a>(choice: &'a Option<String>, custom: &'a Option<String>) -> Option<&'a str> {
    match present(choice.as_deref()) {
        Some(CUSTOM) => present(custom.as_deref()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(scene_type: &str) -> SceneSpec {
        SceneSpec {
            scene_type: Some(scene_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_preset_with_context() {
        let spec = SceneSpec {
            time_of_day: Some("Golden Hour".to_string()),
            weather: Some("Clear".to_string()),
            ..spec("Exterior")
        };
        assert_eq!(
            build_scene(&spec, PresetLibrary::builtin()),
            "Outdoor location with natural environment, golden hour lighting, clear conditions"
        );
    }

    #[test]
    fn test_custom_time_and_weather() {
        let spec = SceneSpec {
            time_of_day: Some("Custom".to_string()),
            custom_time_of_day: Some("Pre-dawn twilight".to_string()),
            weather: Some("Custom".to_string()),
            custom_weather: Some("  ".to_string()),
            environment_details: Some(" dust in sunbeams ".to_string()),
            ..spec("Workshop")
        };
        assert_eq!(
            build_scene(&spec, PresetLibrary::builtin()),
            "Industrial or craft workspace with tools and materials, pre-dawn twilight lighting, dust in sunbeams"
        );
    }

    #[test]
    fn test_custom_without_description() {
        assert_eq!(build_scene(&spec("Custom"), PresetLibrary::builtin()), "General scene");
        let custom = SceneSpec {
            custom_description: Some(" Rooftop garden ".to_string()),
            ..Default::default()
        };
        assert_eq!(build_scene(&custom, PresetLibrary::builtin()), "Rooftop garden");
    }

    #[test]
    fn test_unknown_scene_type_keeps_context() {
        let spec = SceneSpec {
            weather: Some("Foggy".to_string()),
            ..spec("Moonbase")
        };
        assert_eq!(build_scene(&spec, PresetLibrary::builtin()), "foggy conditions");
    }

    #[test]
    fn test_dropdown_choices_are_trimmed() {
        let spec = SceneSpec {
            time_of_day: Some(" Golden Hour ".to_string()),
            weather: Some("   ".to_string()),
            ..spec("Exterior")
        };
        assert_eq!(
            build_scene(&spec, PresetLibrary::builtin()),
            "Outdoor location with natural environment, golden hour lighting"
        );
    }
}
