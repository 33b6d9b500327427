use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChangelogError, Result};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "changelog.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".changelog.toml";

/// Represents the complete configuration for the changelog generator.
///
/// Everything here is optional; an absent file behaves exactly like the
/// built-in defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

/// Where the rendered changelog is written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: default_output_path(),
        }
    }
}

/// Optional directory holding `main.md`, `header.md`, `commit.md` and
/// `footer.md`. When unset the templates compiled into the binary are used.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TemplatesConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_to() -> String {
    "HEAD".to_string()
}

/// Git history walk settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_to")]
    pub to: String,

    #[serde(default)]
    pub no_merges: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            to: default_to(),
            no_merges: false,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog.toml` in current directory
/// 3. `.changelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    log::debug!("loading configuration from {}", path.display());

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ChangelogError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| ChangelogError::config(format!("{}: {}", path.display(), e)))
}

/// Parses a TOML configuration document.
pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.path, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.templates.dir, None);
        assert_eq!(config.git.to, "HEAD");
        assert!(!config.git.no_merges);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
[templates]
dir = "custom/templates"

[git]
no_merges = true
"#,
        )
        .unwrap();

        assert_eq!(
            config.templates.dir,
            Some(PathBuf::from("custom/templates"))
        );
        assert!(config.git.no_merges);
        assert_eq!(config.git.to, "HEAD");
        assert_eq!(config.output.path, PathBuf::from("CHANGELOG.md"));
    }

    #[test]
    fn test_invalid_document() {
        assert!(parse_config("[output\npath = 3").is_err());
    }
}
