//! Configuration management for liberty-detect
//!
//! Settings are loaded from environment variables with sensible defaults.
//! The Liberty plugin coordinates and minimum container versions are not
//! configurable; they live as constants in [`crate::buildsystem`].
//!
//! # Environment Variables
//!
//! - `LIBERTY_DETECT_LOG_LEVEL`: Logging level - default: "info"
//! - `LIBERTY_DETECT_LOG_JSON`: Emit JSON logs (true|false) - default: "false"
//! - `LIBERTY_DETECT_NATURE_ID`: Nature id used as the Liberty marker -
//!   default: "io.openliberty.tools.eclipse.libertyNature"
//! - `LIBERTY_DETECT_METADATA_FILE`: Project metadata file holding natures -
//!   default: ".project"
//!
//! # Example
//!
//! ```no_run
//! use liberty_detect::DetectConfig;
//!
//! let config = DetectConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::nature::{DEFAULT_METADATA_FILE, LIBERTY_NATURE_ID};
use std::collections::HashMap;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Use JSON log output
    pub log_json: bool,

    /// Nature id written to mark Liberty projects
    pub nature_id: String,

    /// File name, relative to the project root, holding the nature list
    pub metadata_file: String,
}

impl Default for DetectConfig {
    /// Loads `LIBERTY_DETECT_*` variables, falling back to defaults
    fn default() -> Self {
        let log_level = env::var("LIBERTY_DETECT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("LIBERTY_DETECT_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        let nature_id =
            env::var("LIBERTY_DETECT_NATURE_ID").unwrap_or_else(|_| LIBERTY_NATURE_ID.to_string());

        let metadata_file = env::var("LIBERTY_DETECT_METADATA_FILE")
            .unwrap_or_else(|_| DEFAULT_METADATA_FILE.to_string());

        Self {
            log_level,
            log_json,
            nature_id,
            metadata_file,
        }
    }
}

impl DetectConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the log level is unknown, the nature id is
    /// blank or contains whitespace, or the metadata file is not a plain
    /// file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.nature_id.trim().is_empty() || self.nature_id.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid nature id: {:?}",
                self.nature_id
            )));
        }

        if self.metadata_file.is_empty()
            || self.metadata_file.contains('/')
            || self.metadata_file.contains('\\')
            || self.metadata_file == ".."
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Metadata file must be a file name in the project root: {:?}",
                self.metadata_file
            )));
        }

        Ok(())
    }

    /// Key/value view for display
    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert("log_json".to_string(), self.log_json.to_string());
        map.insert("nature_id".to_string(), self.nature_id.clone());
        map.insert("metadata_file".to_string(), self.metadata_file.clone());
        map
    }
}
