//! Configuration types for diagram healing and export.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command-line front end. Every section and field has a
//! default, so an empty file is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining healing and output settings.
//! - [`HealingConfig`] - Controls the repair budget and parallel execution.
//! - [`OutputConfig`] - Controls the names of exported diagram files.
//!
//! # Example
//!
//! ```
//! # use umlmend::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.healing().max_attempts(), 3);
//! assert_eq!(config.output().file_name(1), "diagram-1.puml");
//! ```

use serde::Deserialize;

use crate::heal::MAX_ATTEMPTS;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Healing configuration section.
    #[serde(default)]
    healing: HealingConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `healing` - Repair budget and execution settings.
    /// * `output` - Exported file naming.
    pub fn new(healing: HealingConfig, output: OutputConfig) -> Self {
        Self { healing, output }
    }

    /// Returns the healing configuration.
    pub fn healing(&self) -> &HealingConfig {
        &self.healing
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns this configuration with the repair budget replaced.
    pub fn with_max_attempts(mut self, max_attempts: u8) -> Self {
        self.healing.max_attempts = max_attempts;
        self
    }
}

/// Repair budget and execution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HealingConfig {
    /// Number of repair attempts after the initial sanitize pass.
    #[serde(default = "default_max_attempts")]
    max_attempts: u8,

    /// Heal fragments on worker threads.
    #[serde(default)]
    parallel: bool,
}

fn default_max_attempts() -> u8 {
    MAX_ATTEMPTS
}

impl Default for HealingConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            parallel: false,
        }
    }
}

impl HealingConfig {
    /// Creates a new [`HealingConfig`].
    pub fn new(max_attempts: u8, parallel: bool) -> Self {
        Self {
            max_attempts,
            parallel,
        }
    }

    /// Returns the repair budget, never more than [`MAX_ATTEMPTS`].
    pub fn max_attempts(&self) -> u8 {
        self.max_attempts.min(MAX_ATTEMPTS)
    }

    /// Returns `true` if fragments are healed on worker threads.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Checks the configured values without clamping them.
    ///
    /// # Errors
    ///
    /// Returns a message if `max_attempts` exceeds [`MAX_ATTEMPTS`].
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts > MAX_ATTEMPTS {
            return Err(format!(
                "max_attempts must be between 0 and {MAX_ATTEMPTS}, got {}",
                self.max_attempts
            ));
        }
        Ok(())
    }
}

/// Naming of exported diagram files.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// File name prefix.
    #[serde(default = "default_file_stem")]
    file_stem: String,

    /// File extension, without the dot.
    #[serde(default = "default_extension")]
    extension: String,
}

fn default_file_stem() -> String {
    "diagram".to_string()
}

fn default_extension() -> String {
    "puml".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_stem: default_file_stem(),
            extension: default_extension(),
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(file_stem: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            file_stem: file_stem.into(),
            extension: extension.into(),
        }
    }

    /// Returns the file name prefix.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Returns the file extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the file name of the diagram at 1-based `position`.
    pub fn file_name(&self, position: usize) -> String {
        format!("{}-{position}.{}", self.file_stem, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.healing().max_attempts(), MAX_ATTEMPTS);
        assert!(!config.healing().parallel());
        assert_eq!(config.output().file_stem(), "diagram");
        assert_eq!(config.output().extension(), "puml");
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [healing]
            parallel = true

            [output]
            extension = "txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.healing().max_attempts(), MAX_ATTEMPTS);
        assert!(config.healing().parallel());
        assert_eq!(config.output().file_name(2), "diagram-2.txt");
    }

    #[test]
    fn test_max_attempts_is_clamped_and_reported() {
        let healing = HealingConfig::new(7, false);
        assert_eq!(healing.max_attempts(), MAX_ATTEMPTS);
        assert!(healing.validate().is_err());

        assert!(HealingConfig::new(0, false).validate().is_ok());
        assert_eq!(HealingConfig::new(0, false).max_attempts(), 0);
    }

    #[test]
    fn test_with_max_attempts() {
        let config = AppConfig::default().with_max_attempts(1);
        assert_eq!(config.healing().max_attempts(), 1);
    }
}
