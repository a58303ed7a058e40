use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "semtagger.toml";
/// Config file looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".semtagger.toml";

/// Represents the complete configuration for semtagger.
///
/// Every section is optional in the file; missing sections fall back to defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub branches: BranchesConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default list of release branches.
fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

/// Branches on which tagging is allowed without `--force`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchesConfig {
    #[serde(default = "default_release_branches")]
    pub release: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        BranchesConfig {
            release: default_release_branches(),
        }
    }
}

fn default_remote_name() -> String {
    "origin".to_string()
}

/// Remote used for pulling and pushing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

fn default_tag_message() -> String {
    "Release {tag}".to_string()
}

/// Annotation settings for created tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Annotation message; `{tag}` is replaced with the new tag name
    #[serde(default = "default_tag_message")]
    pub message: String,
}

impl TagConfig {
    /// Render the annotation message for `tag`
    pub fn message_for(&self, tag: &str) -> String {
        self.message.replace("{tag}", tag)
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            message: default_tag_message(),
        }
    }
}

/// Defaults for behavior otherwise chosen on the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Pull from the remote before resolving the latest tag
    #[serde(default)]
    pub pull: bool,

    /// Push the new tag after creating it
    #[serde(default)]
    pub push: bool,
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semtagger.toml` in current directory
/// 3. `.semtagger.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
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
