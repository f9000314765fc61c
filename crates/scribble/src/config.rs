//! Configuration types for Scribble scene output.
//!
//! This module provides configuration structures that control how scenes
//! are styled and written. All types implement [`serde::Deserialize`] for
//! loading from TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and export settings.
//! - [`StyleConfig`] - Visual defaults such as the canvas color.
//! - [`ExportConfig`] - How the JSON is written.
//!
//! # Example
//!
//! ```
//! # use scribble::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_none());
//! assert!(config.export().pretty());
//! ```

use serde::Deserialize;

use scribble_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, export: ExportConfig) -> Self {
        Self { style, export }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Visual styling configuration.
///
/// Fields that are not set fall back to the document defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Canvas [`Color`], as any CSS color string.
    #[serde(default)]
    background_color: Option<Color>,
}

impl StyleConfig {
    pub fn new(background_color: Option<Color>) -> Self {
        Self { background_color }
    }

    /// Returns the configured canvas color, if any.
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }
}

/// JSON output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Indent output by two spaces. Defaults to `true`.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
