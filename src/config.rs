use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseNotesError, Result};

/// Represents the complete configuration for release-notes.
///
/// Every value has a default, so a missing file or a partial file is fine.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Returns the default version descriptors, in lookup order.
fn default_version_sources() -> Vec<String> {
    vec!["bower.json".to_string(), "package.json".to_string()]
}

/// Returns the default notes file candidates, highest priority first.
fn default_notes_candidates() -> Vec<String> {
    vec![
        "RELEASE.md".to_string(),
        "release-notes.md".to_string(),
        "CHANGELOG.md".to_string(),
    ]
}

fn default_state_file() -> String {
    ".generator-release".to_string()
}

/// Well-known file names used by the notes workflow.
///
/// The last entry of `notes_candidates` doubles as the write target when none
/// of the candidates exist yet.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_version_sources")]
    pub version_sources: Vec<String>,

    #[serde(default = "default_notes_candidates")]
    pub notes_candidates: Vec<String>,

    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            version_sources: default_version_sources(),
            notes_candidates: default_notes_candidates(),
            state_file: default_state_file(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_tip() -> String {
    "master".to_string()
}

/// Version-control names used when building comparison links.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Name standing in for the unreleased branch tip in `...tip` links
    #[serde(default = "default_tip")]
    pub tip: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            tip: default_tip(),
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self> {
        if self.files.version_sources.is_empty() {
            return Err(ReleaseNotesError::configuration(
                "files.version_sources must list at least one file",
            ));
        }
        if self.files.notes_candidates.is_empty() {
            return Err(ReleaseNotesError::configuration(
                "files.notes_candidates must list at least one file",
            ));
        }
        if self.git.tip.is_empty() {
            return Err(ReleaseNotesError::configuration("git.tip must not be empty"));
        }
        Ok(self)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasenotes.toml` in current directory
/// 3. `.releasenotes.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed, or fails validation
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasenotes.toml").exists() {
        fs::read_to_string("./releasenotes.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasenotes.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses and validates configuration text.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)
        .map_err(|e| ReleaseNotesError::configuration(format!("Invalid config file: {}", e)))?;
    config.validate()
}
