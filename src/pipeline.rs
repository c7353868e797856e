//! Composition Pipeline - Single Entry Point
//!
//! Fragments are built independently and only meet here, at assembly.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::CameraSpec;
use crate::color::ColorPalette;
use crate::document::{prune, serialize, PromptDocument, PromptFields};
use crate::error::PromptError;
use crate::hashing::fingerprint;
use crate::presets::PresetLibrary;
use crate::scene::{build_scene, SceneSpec};
use crate::style::{select_style, StyleSpec};
use crate::subject::{build_subject, collect, collect_with_priority, SubjectSpec, SUBJECT_SLOTS};
use crate::ENGINE_VERSION;

/// A fragment given either as final text or as builder inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment<T> {
    Text(String),
    Spec(T),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSpec {
    Colors(Vec<String>),
    Preset { preset: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    pub pretty: bool,
    pub remove_empty: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            remove_empty: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeRequest {
    pub scene: Option<Fragment<SceneSpec>>,
    pub style: Option<Fragment<StyleSpec>>,
    /// Subject slots; `null` marks an empty slot
    pub subjects: Vec<Option<SubjectSpec>>,
    pub priorities: Vec<i32>,
    pub sort_by_priority: bool,
    pub color_palette: Option<PaletteSpec>,
    pub lighting: Option<String>,
    pub mood: Option<String>,
    pub background: Option<String>,
    pub composition: Option<String>,
    pub camera: Option<CameraSpec>,
    pub options: ComposeOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposedPrompt {
    pub json: String,
    pub document: PromptDocument,
    pub fingerprint: String,
    pub engine_version: String,
    pub subject_summary: Vec<String>,
    pub palette_preview: Vec<String>,
    pub camera_summary: Vec<String>,
}

/// The composition pipeline - single entry point for building prompts
pub struct CompositionPipeline {
    presets: PresetLibrary,
}

impl CompositionPipeline {
    pub fn new(presets: PresetLibrary) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    pub fn compose(&self, request: &ComposeRequest) -> Result<ComposedPrompt, PromptError> {
        if request.subjects.len() > SUBJECT_SLOTS {
            return Err(PromptError::Validation(format!(
                "{} subject slots given, at most {} supported",
                request.subjects.len(),
                SUBJECT_SLOTS
            )));
        }

        let scene = request.scene.as_ref().map(|fragment| match fragment {
            Fragment::Text(text) => text.clone(),
            Fragment::Spec(spec) => build_scene(spec, &self.presets),
        });

        let style = request.style.as_ref().map(|fragment| match fragment {
            Fragment::Text(text) => text.clone(),
            Fragment::Spec(spec) => select_style(spec, &self.presets),
        });

        // A bad slot fails the whole call
        let slots = request
            .subjects
            .iter()
            .map(|slot| slot.as_ref().map(build_subject).transpose())
            .collect::<Result<Vec<_>, _>>()?;

        let subjects = if request.sort_by_priority || !request.priorities.is_empty() {
            collect_with_priority(slots, &request.priorities, request.sort_by_priority)
        } else {
            collect(slots)
        };
        let subject_summary = subjects.summary();

        let palette = request.color_palette.as_ref().map(|spec| match spec {
            PaletteSpec::Colors(colors) => ColorPalette::from_candidates(colors),
            PaletteSpec::Preset { preset } => ColorPalette::from_preset(&self.presets, preset),
        });
        let palette_preview = palette.as_ref().map(ColorPalette::preview).unwrap_or_default();

        let (camera, camera_summary) = match &request.camera {
            Some(spec) => {
                let (record, summary) = spec.resolve(&self.presets);
                (Some(record), summary)
            }
            None => (None, vec![]),
        };

        let fields = PromptFields {
            scene,
            subjects: subjects.into_subjects(),
            style,
            color_palette: palette,
            lighting: request.lighting.clone(),
            mood: request.mood.clone(),
            background: request.background.clone(),
            composition: request.composition.clone(),
            camera,
        };

        let mut document = fields.assemble()?;
        if request.options.remove_empty {
            document = prune(&document);
        }

        let json = serialize(&document, request.options.pretty)?;
        let fingerprint = fingerprint(&document)?;
        info!(%fingerprint, keys = document.len(), "composed prompt");

        Ok(ComposedPrompt {
            json,
            document,
            fingerprint,
            engine_version: ENGINE_VERSION.to_string(),
            subject_summary,
            palette_preview,
            camera_summary,
        })
    }
}

impl Default for CompositionPipeline {
    fn default() -> Self {
        Self::new(PresetLibrary::default())
    }
}
