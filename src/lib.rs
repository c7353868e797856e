//! PromptForge Core - Prompt Composition Engine
//!
//! # Guarantees
//! 1. Explicit Beats Preset
//! 2. Rejected Colors Never Enter a Palette
//! 3. Slot Order Is Output Order
//! 4. Canonical Key Order
//! 5. Pruning Is Idempotent
//! 6. Same Fragments, Same Document

pub mod error;
pub mod color;
pub mod merge;
pub mod presets;
pub mod camera;
pub mod subject;
pub mod scene;
pub mod style;
pub mod document;
pub mod hashing;
pub mod pipeline;

pub use error::PromptError;
pub use color::{ColorPalette, ColorToken};
pub use merge::{merge_record, merge_scalar, Overlay};
pub use presets::PresetLibrary;
pub use camera::{CameraOverrides, CameraRecord, CameraSpec};
pub use subject::{build_subject, collect, collect_with_priority, SubjectCollection, SubjectRecord, SubjectSpec};
pub use scene::{build_scene, SceneSpec};
pub use style::{select_style, select_style_by_index, StyleSpec};
pub use document::{assemble, prune, serialize, PromptDocument, PromptFields, CANONICAL_ORDER};
pub use hashing::fingerprint;
pub use pipeline::{CompositionPipeline, ComposeRequest, ComposedPrompt, ComposeOptions};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
