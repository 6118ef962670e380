//! Configuration file loading for the CLI
//!
//! Finds the TOML configuration for a run and checks the values the library
//! would otherwise clamp silently.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use umlmend::{UmlmendError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for UmlmendError {
    fn from(err: ConfigError) -> Self {
        UmlmendError::Config(err.to_string())
    }
}

/// Relative path of the project-local configuration file.
const LOCAL_CONFIG: &str = "umlmend/config.toml";

/// Where an implicitly discovered configuration file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    Local,
    System,
}

/// Load the CLI configuration.
///
/// An explicit path must exist. Without one, the first existing file among
/// [`LOCAL_CONFIG`] and the platform config directory is used, and the
/// defaults apply when neither exists.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - Config values are out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, UmlmendError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let found = implicit_candidates()
        .into_iter()
        .find(|(_, path)| path.exists());

    match found {
        Some((source, path)) => {
            info!(source:?, path:% = path.display(); "Loading configuration");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Implicit configuration locations, in search order.
fn implicit_candidates() -> Vec<(ConfigSource, PathBuf)> {
    let mut candidates = vec![(ConfigSource::Local, PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "umlmend", "umlmend") {
        Some(dirs) => {
            let path = dirs.config_dir().join("config.toml");
            candidates.push((ConfigSource::System, path));
        }
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - A value is out of range
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, UmlmendError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .healing()
        .validate()
        .map_err(ConfigError::Validation)?;

    Ok(config)
}
