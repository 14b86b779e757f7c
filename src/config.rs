use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{GitVersionError, Result};
use crate::pipeline::PipelineSelection;

/// File name looked up in the repository root
pub const LOCAL_CONFIG_FILE: &str = "gitversion.toml";
/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".gitversion.toml";

/// Defaults for every non-override setting, read from a TOML file.
///
/// Each key is optional; anything left out falls back to the built-in
/// defaults. Command-line values always take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version_pattern: Option<String>,
    pub tag_pattern: Option<String>,
    pub major_pattern: Option<String>,
    pub minor_pattern: Option<String>,
    pub patch_pattern: Option<String>,
    pub directory: Option<String>,
    pub component: Option<String>,
    pub dirty_ignore: Option<bool>,
    pub dirty_suffix: Option<String>,
    pub append_hash: Option<bool>,
    pub pipeline: Option<PipelineSelection>,
    pub pipeline_gitlab_dotenv: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GitVersionError::config(e.to_string()))
    }
}

/// Locate the configuration file to use, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter
/// 2. `gitversion.toml` in the repository root
/// 3. `.gitversion.toml` in the user config directory
pub fn find_config(config_path: Option<&Path>, repository_path: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    let local = repository_path.join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `repository_path` - Repository root searched for `gitversion.toml`
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - [GitVersionError::Io] if the file cannot be read,
///   [GitVersionError::Config] if it cannot be parsed
pub fn load_config(config_path: Option<&Path>, repository_path: &Path) -> Result<Config> {
    let Some(path) = find_config(config_path, repository_path) else {
        debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!("Loading configuration from {}", path.display());
    let text = fs::read_to_string(&path)?;
    toml::from_str(&text)
        .map_err(|e| GitVersionError::config(format!("{}: {}", path.display(), e)))
}
