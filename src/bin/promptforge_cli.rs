//! PromptForge CLI - Bridge interface for host integrations
//!
//! Commands: presets, compose, color
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on validation failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use promptforge_core::{
    color,
    CompositionPipeline, ComposeRequest, PresetLibrary, PromptError,
};

#[derive(Parser)]
#[command(name = "promptforge-cli")]
#[command(about = "PromptForge CLI - Prompt Composition Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a preset library JSON file (builtin presets if omitted)
    #[arg(short, long)]
    presets: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List preset names
    Presets,

    /// Compose a prompt document
    Compose {
        /// JSON payload (ComposeRequest)
        #[arg(short, long)]
        payload: String,

        /// Emit compact JSON regardless of payload options
        #[arg(long)]
        compact: bool,
    },

    /// Validate and normalize a hex color
    Color {
        #[arg(short, long)]
        token: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let presets = match &cli.presets {
        Some(path) => match PresetLibrary::load_from_file(path) {
            Ok(library) => library,
            Err(e) => {
                print_json(&serde_json::json!({"error": format!("Failed to load presets: {}", e)}));
                return ExitCode::FAILURE;
            }
        },
        None => PresetLibrary::default(),
    };

    let pipeline = CompositionPipeline::new(presets);

    match cli.command {
        Commands::Presets => {
            let library = pipeline.presets();
            print_json(&serde_json::json!({
                "version": library.version,
                "scene_types": library.scene_types.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
                "style_categories": library.style_categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                "camera_presets": library.camera_presets.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                "palette_presets": library.palette_presets.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                "moods": library.moods(),
                "positions": library.position_vocabulary(),
            }));
            ExitCode::SUCCESS
        }

        Commands::Compose { payload, compact } => {
            let mut request: ComposeRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => {
                    print_json(&serde_json::json!({"success": false, "error": format!("Invalid payload: {}", e)}));
                    return ExitCode::FAILURE;
                }
            };
            if compact {
                request.options.pretty = false;
            }

            match pipeline.compose(&request) {
                Ok(prompt) => {
                    print_json(&serde_json::json!({
                        "success": true,
                        "prompt": prompt,
                    }));
                    ExitCode::SUCCESS
                }
                Err(e @ PromptError::Validation(_)) => {
                    print_json(&serde_json::json!({"success": false, "error": e.to_string()}));
                    ExitCode::from(2)  // Validation failure
                }
                Err(e) => {
                    print_json(&serde_json::json!({"success": false, "error": e.to_string()}));
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Color { token } => {
            let valid = color::validate(&token);
            let normalized = valid.then(|| color::normalize(&token));
            print_json(&serde_json::json!({
                "token": token,
                "valid": valid,
                "normalized": normalized,
            }));
            if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}
