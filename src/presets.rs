//! Preset Library - Read-Only Configuration Tables
//!
//! The builtin library is built once per process and never mutated.
//! External libraries are JSON files checked against the engine version.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::camera::CameraRecord;
use crate::error::PromptError;
use crate::ENGINE_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetLibrary {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_version")]
    pub engine_min_version: String,
    #[serde(default)]
    pub scene_types: Vec<ScenePreset>,
    #[serde(default)]
    pub style_categories: Vec<StyleCategory>,
    #[serde(default)]
    pub moods: Vec<String>,
    #[serde(default)]
    pub camera_presets: Vec<CameraPreset>,
    #[serde(default)]
    pub palette_presets: Vec<PalettePreset>,
    #[serde(default)]
    pub positions: PositionVocabulary,
}

fn default_version() -> String { "1.0.0".to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePreset {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleCategory {
    pub name: String,
    #[serde(default)]
    pub presets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPreset {
    pub name: String,
    pub camera: CameraRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalettePreset {
    pub name: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionVocabulary {
    #[serde(default)]
    pub horizontal: Vec<String>,
    #[serde(default)]
    pub vertical: Vec<String>,
    #[serde(default)]
    pub depth: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

static BUILTIN: Lazy<PresetLibrary> = Lazy::new(PresetLibrary::from_tables);

impl PresetLibrary {
    /// Process-wide builtin library.
    pub fn builtin() -> &'static PresetLibrary {
        &BUILTIN
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PromptError> {
        let content = fs::read_to_string(path)?;
        let library: PresetLibrary = serde_json::from_str(&content)?;
        library.check_engine_version()?;
        debug!(
            path = %path.display(),
            version = %library.version,
            cameras = library.camera_presets.len(),
            "loaded preset library"
        );
        Ok(library)
    }

    fn check_engine_version(&self) -> Result<(), PromptError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PromptError::InvalidVersion(ENGINE_VERSION.to_string()))?;
        let min_ver = semver::Version::parse(&self.engine_min_version)
            .map_err(|_| PromptError::InvalidVersion(self.engine_min_version.clone()))?;

        if engine_ver < min_ver {
            return Err(PromptError::EngineVersionMismatch(
                self.version.clone(),
                self.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }

    pub fn scene(&self, name: &str) -> Option<&str> {
        self.scene_types
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.description.as_str())
    }

    /// Presets of a style category, in declaration order.
    pub fn style_presets(&self, category: &str) -> &[String] {
        self.style_categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.presets.as_slice())
            .unwrap_or(&[])
    }

    pub fn camera_preset(&self, name: &str) -> Option<&CameraRecord> {
        self.camera_presets
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.camera)
    }

    pub fn palette_preset(&self, name: &str) -> Option<&[String]> {
        self.palette_presets
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.colors.as_slice())
    }

    pub fn moods(&self) -> &[String] {
        &self.moods
    }

    pub fn position_vocabulary(&self) -> &PositionVocabulary {
        &self.positions
    }

    fn from_tables() -> Self {
        Self {
            version: default_version(),
            engine_min_version: default_version(),
            scene_types: SCENE_TYPES
                .iter()
                .map(|(name, description)| ScenePreset {
                    name: name.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            style_categories: STYLE_CATEGORIES
                .iter()
                .map(|(name, presets)| StyleCategory {
                    name: name.to_string(),
                    presets: strings(presets),
                })
                .collect(),
            moods: strings(MOODS),
            camera_presets: CAMERA_PRESETS
                .iter()
                .map(|row| CameraPreset {
                    name: row.0.to_string(),
                    camera: CameraRecord {
                        angle: Some(row.1.to_string()),
                        distance: Some(row.2.to_string()),
                        lens: None,
                        lens_mm: Some(row.3),
                        f_number: Some(row.4.to_string()),
                        iso: Some(row.5),
                        depth_of_field: Some(row.6.to_string()),
                        focus: Some(row.7.to_string()),
                    },
                })
                .collect(),
            palette_presets: PALETTE_PRESETS
                .iter()
                .map(|(name, colors)| PalettePreset {
                    name: name.to_string(),
                    colors: strings(colors),
                })
                .collect(),
            positions: PositionVocabulary {
                horizontal: strings(POSITION_HORIZONTAL),
                vertical: strings(POSITION_VERTICAL),
                depth: strings(POSITION_DEPTH),
                examples: strings(POSITION_EXAMPLES),
            },
        }
    }
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// --- Builtin Tables ---

const SCENE_TYPES: &[(&str, &str)] = &[
    ("Studio", "Professional photography studio with seamless backdrop"),
    ("Interior", "Indoor space with natural or artificial lighting"),
    ("Exterior", "Outdoor location with natural environment"),
    ("Product Stage", "Minimal product photography setup with clean surface"),
    ("Workshop", "Industrial or craft workspace with tools and materials"),
    ("Office", "Modern office environment with desks and equipment"),
    ("Kitchen", "Culinary space with counters and appliances"),
    ("Living Room", "Comfortable residential living space"),
    ("Urban Street", "City street with buildings and urban elements"),
    ("Natural Landscape", "Outdoor natural environment with terrain and vegetation"),
];

const STYLE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Photorealistic", &[
        "Ultra-realistic product photography with commercial quality",
        "Photorealistic CGI rendering with ray-traced lighting",
        "High-end editorial photography with professional finish",
        "Documentary-style photojournalism with natural authenticity",
        "Architectural photography with precise technical detail",
    ]),
    ("Film Photography", &[
        "Analog film photography, shot on Kodak Portra 400",
        "Vintage film photo with natural grain, shot on Fuji Velvia 50",
        "Black and white film photography, Ilford HP5 Plus",
        "Instant film aesthetic, Polaroid SX-70 style",
        "Medium format film, Hasselblad with Kodak Ektar 100",
    ]),
    ("Digital Eras", &[
        "Modern digital photography, shot on Sony A7IV, clean sharp",
        "Early 2000s digital camera aesthetic with slight noise",
        "1990s digicam style with CCD sensor characteristics",
        "Smartphone photography style, computational processing",
    ]),
    ("Artistic", &[
        "Impressionist painting with visible brushstrokes",
        "Oil painting with rich colors and texture",
        "Watercolor illustration with soft flowing colors",
        "Digital illustration with clean vector aesthetics",
        "Minimalist design with geometric shapes",
    ]),
    ("Cinematic", &[
        "Cinematic movie still with dramatic lighting",
        "Film noir aesthetic with high contrast shadows",
        "Wes Anderson style with symmetrical composition and pastel colors",
        "Blade Runner inspired with neon and atmospheric haze",
    ]),
    ("Technical", &[
        "Technical blueprint style with precise measurements",
        "Scientific documentation with clinical accuracy",
        "X-ray imaging style with translucent structures",
        "Infrared photography with surreal color shifts",
    ]),
];

const MOODS: &[&str] = &[
    "Clean, professional, minimalist",
    "Warm, inviting, cozy",
    "Energetic and vibrant",
    "Calm and peaceful",
    "Dramatic and intense",
    "Mysterious and intriguing",
    "Playful and whimsical",
    "Elegant and sophisticated",
    "Melancholic and nostalgic",
    "Bold and confident",
    "Serene and tranquil",
    "Tense and suspenseful",
    "Joyful and uplifting",
    "Dark and moody",
    "Bright and cheerful",
];

// name, angle, distance, lens-mm, f-number, ISO, depth_of_field, focus
type CameraRow = (&'static str, &'static str, &'static str, u32, &'static str, u32, &'static str, &'static str);

const CAMERA_PRESETS: &[CameraRow] = &[
    ("Portrait", "Eye level, slight low angle", "Medium shot", 85, "f/2.0", 200,
        "Shallow, background softly blurred", "Sharp focus on subject's eyes"),
    ("Product Photography", "Slight overhead angle, 30 degrees", "Medium shot", 85, "f/5.6", 200,
        "Moderate depth, product sharp", "Sharp focus on product details"),
    ("Landscape", "Eye level or slightly elevated", "Wide shot", 24, "f/11", 100,
        "Deep, everything in focus", "Infinity focus, entire scene sharp"),
    ("Macro", "Perpendicular to subject", "Extreme close-up", 100, "f/2.8", 400,
        "Very shallow, narrow plane of focus", "Sharp on main detail, background melts away"),
    ("Street Photography", "Eye level, candid perspective", "Medium to full shot", 35, "f/5.6", 400,
        "Moderate depth, subject and context visible", "Zone focus on subject"),
    ("Wide Angle", "Low angle or eye level", "Wide shot", 16, "f/8", 200,
        "Deep, expansive focus", "Hyperfocal, near to far"),
];

const PALETTE_PRESETS: &[(&str, &[&str])] = &[
    ("Vibrant Primary", &["#FF0000", "#00FF00", "#0000FF", "#FFFF00"]),
    ("Pastel Spring", &["#FFB3BA", "#BAFFC9", "#BAE1FF", "#FFFFBA"]),
    ("Earth Tones", &["#8B4513", "#D2691E", "#CD853F", "#DEB887"]),
    ("Ocean Blues", &["#000080", "#0000CD", "#4169E1", "#87CEEB"]),
    ("Sunset Warm", &["#FF4500", "#FF6347", "#FFD700", "#FFA500"]),
    ("Monochrome Gray", &["#2F2F2F", "#5F5F5F", "#8F8F8F", "#CFCFCF"]),
    ("Neon Cyberpunk", &["#FF00FF", "#00FFFF", "#FF0080", "#8000FF"]),
    ("Forest Green", &["#228B22", "#32CD32", "#90EE90", "#98FB98"]),
    ("Royal Purple", &["#4B0082", "#8B008B", "#9370DB", "#DDA0DD"]),
    ("Fire Red", &["#8B0000", "#DC143C", "#FF6347", "#FFA07A"]),
];

const POSITION_HORIZONTAL: &[&str] = &[
    "far left", "left side", "left of center", "center", "right of center", "right side", "far right",
];

const POSITION_VERTICAL: &[&str] = &["top", "upper third", "middle", "lower third", "bottom"];

const POSITION_DEPTH: &[&str] = &["foreground", "midground", "background"];

const POSITION_EXAMPLES: &[&str] = &[
    "Center foreground",
    "Left side midground",
    "Right upper third background",
    "Far right foreground",
    "Center background, upper third",
];
