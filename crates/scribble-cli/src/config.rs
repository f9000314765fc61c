//! Locating and reading the scribble settings file.
//!
//! Settings come from the first file that applies:
//!
//! - the file passed with `--config`, which must exist;
//! - `scribble.toml` in the working directory;
//! - `config.toml` in the user's scribble configuration directory.
//!
//! When none is present the built-in [`AppConfig::default`] is used.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use scribble::config::AppConfig;

/// Settings file looked for in the working directory.
const WORKING_DIR_FILE: &str = "scribble.toml";

/// Settings file looked for in the user's configuration directory.
const USER_DIR_FILE: &str = "config.toml";

/// Errors raised while reading a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a settings file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    CommandLine,
    WorkingDir,
    UserDir,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommandLine => "command line",
            Self::WorkingDir => "working directory",
            Self::UserDir => "user directory",
        };
        f.write_str(label)
    }
}

/// Loads the settings for one run.
///
/// An explicit path bypasses the lookup entirely.
///
/// # Errors
///
/// Returns [`ConfigError`] if the explicit file is missing, or if the chosen
/// file cannot be read or is not valid settings TOML.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    match explicit_path {
        Some(path) => read_settings(Origin::CommandLine, path.as_ref()),
        None => load_first(&lookup_candidates()),
    }
}

/// Settings files in lookup order, without the `--config` override.
fn lookup_candidates() -> Vec<(Origin, PathBuf)> {
    let mut candidates = vec![(Origin::WorkingDir, PathBuf::from(WORKING_DIR_FILE))];
    match ProjectDirs::from("", "", "scribble") {
        Some(dirs) => {
            let path = dirs.config_dir().join(USER_DIR_FILE);
            candidates.push((Origin::UserDir, path));
        }
        None => debug!("No user configuration directory on this platform"),
    }
    candidates
}

/// Reads the first candidate that exists, or falls back to the defaults.
fn load_first(candidates: &[(Origin, PathBuf)]) -> Result<AppConfig, ConfigError> {
    match candidates.iter().find(|(_, path)| path.is_file()) {
        Some((origin, path)) => read_settings(*origin, path),
        None => {
            debug!(searched = candidates.len(); "No settings file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_settings(origin: Origin, path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    info!(origin:% = origin, path:% = path.display(); "Loading settings");

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })
}
