//! Configuration loading and parsing.
//!
//! `sift.toml` is looked up in the working directory, then in the platform
//! config directory (`<config_dir>/sift/sift.toml`). A `--config` path given
//! to the binary skips discovery. Every field has a default, unknown fields
//! are ignored, and a file that fails to parse falls back to defaults with a
//! warning so a typo never blocks startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "sift.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// History file; `None` resolves to `<home>/.sift_history`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "HistoryConfig::default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: Self::default_max_entries(),
        }
    }
}

impl HistoryConfig {
    const fn default_max_entries() -> usize {
        1000
    }

    /// Effective history file location, if a home directory is known.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".sift_history")))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file")]
    pub file: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "LogConfig::default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Self::default_file(),
            filter: Self::default_filter(),
        }
    }
}

impl LogConfig {
    fn default_file() -> PathBuf {
        PathBuf::from("sift.log")
    }
    fn default_filter() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    #[serde(default = "PromptConfig::default_text")]
    pub text: String,
    #[serde(default = "PromptConfig::default_color")]
    pub color: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            text: Self::default_text(),
            color: Self::default_color(),
        }
    }
}

impl PromptConfig {
    fn default_text() -> String {
        "sift> ".to_string()
    }
    const fn default_color() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// `tab`, `space`, or a literal separator.
    #[serde(default = "MappingConfig::default_separator")]
    pub separator: String,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            separator: Self::default_separator(),
        }
    }
}

impl MappingConfig {
    fn default_separator() -> String {
        "tab".to_string()
    }
}

/// Optional argv overrides for the platform clipboard commands.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub paste: Option<Vec<String>>,
    #[serde(default)]
    pub copy: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub mapping: MappingConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
}

/// Config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("sift").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
