//! Configuration file handling for quick-cmd

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to read config file {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Invalid command pattern `{pattern}`: {source}")]
    Pattern {
        source: glob::PatternError,
        pattern: String,
    },
}

/// File name patterns used when no config overrides them
pub const DEFAULT_PATTERNS: [&str; 2] = ["*.sh", "*.py"];
pub const DEFAULT_COMMANDS_DIR: &str = "commands";
pub const DEFAULT_TITLE: &str = "quick-cmd - command launcher";
pub const DEFAULT_PROMPT: &str = "Which command do you want to run?";
pub const DEFAULT_HINT: &str = "(↑↓ to move, Enter to select, Esc to cancel)";

/// Parse a list of glob pattern strings.
///
/// # Errors
///
/// Returns `ConfigError::Pattern` if any pattern fails to compile.
pub fn parse_patterns(patterns: Vec<String>) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p).map_err(|e| ConfigError::Pattern {
                source: e,
                pattern: p,
            })
        })
        .collect()
}

/// Root configuration structure, every key optional
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    pub commands_dir: Option<PathBuf>,
    pub patterns: Option<Vec<String>>,
    pub interpreters: Option<HashMap<String, String>>,
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub hint: Option<String>,
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".quick-cmd.json", ".quick-cmd.yaml", ".quick-cmd.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file).map_err(|e| ConfigError::Io {
            source: e,
            path: file.to_path_buf(),
        })?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in `start` and its parents.
    #[must_use]
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Some(config_path);
                }
            }
            if !path.pop() {
                return None;
            }
        }
    }
}

/// Resolved launcher settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub commands_dir: PathBuf,
    pub patterns: Vec<Pattern>,
    /// File extension (without the dot) to interpreter command line
    pub interpreters: HashMap<String, String>,
    pub title: String,
    pub prompt: String,
    pub hint: String,
}

impl Settings {
    /// Resolve a parsed config against `base`, the directory relative paths start from.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Pattern` if a configured pattern is invalid.
    pub fn from_config(config: Config, base: &Path) -> Result<Self, ConfigError> {
        let patterns = config.patterns.unwrap_or_else(|| {
            DEFAULT_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect()
        });
        let interpreters = config
            .interpreters
            .unwrap_or_default()
            .into_iter()
            .map(|(ext, cmd)| (ext.trim_start_matches('.').to_string(), cmd))
            .collect();
        Ok(Settings {
            commands_dir: base.join(
                config
                    .commands_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_COMMANDS_DIR)),
            ),
            patterns: parse_patterns(patterns)?,
            interpreters,
            title: config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            prompt: config.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            hint: config.hint.unwrap_or_else(|| DEFAULT_HINT.to_string()),
        })
    }

    /// Default settings scanning `commands_dir`.
    #[must_use]
    pub fn with_commands_dir(commands_dir: impl Into<PathBuf>) -> Self {
        Settings {
            commands_dir: commands_dir.into(),
            patterns: DEFAULT_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
            interpreters: HashMap::new(),
            title: DEFAULT_TITLE.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            hint: DEFAULT_HINT.to_string(),
        }
    }
}
