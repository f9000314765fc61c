//! CLI logic for the Scribble scene tool.
//!
//! Reads a TOML scene file, builds a [`Document`] from it and writes the
//! result as an Excalidraw drawing.

mod args;
mod config;
mod error;
mod scene;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;
pub use scene::SceneFile;

use std::{fs, path::PathBuf};

use log::info;

use scribble::Document;

/// Run the Scribble CLI application
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - Configuration loading errors
/// - Scene file I/O and syntax errors
/// - Unknown or duplicate element names in the scene
/// - Document construction and save errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input).map_err(|source| CliError::ReadScene {
        path: PathBuf::from(&args.input),
        source,
    })?;
    let scene = SceneFile::parse(&source, &args.input)?;

    // The scene's own background wins over the configured default
    let mut doc = Document::new();
    if let Some(color) = scene
        .background()
        .or_else(|| app_config.style().background_color())
    {
        doc = doc.with_background_color(color);
    }
    scene.build_into(&mut doc)?;

    let pretty = app_config.export().pretty() && !args.compact;
    doc.save(&args.output, pretty)?;

    info!(output_file = args.output, elements = doc.len(); "Scene exported successfully");

    Ok(())
}
