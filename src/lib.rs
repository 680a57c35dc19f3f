//! Core implementation of the quick-cmd launcher
//!
//! quick-cmd scans a directory for self-contained command scripts, offers them in an
//! interactive menu and runs the one the user picks. Each script's leading comment
//! becomes its menu description.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config_file::{Config, ConfigError, Settings};

pub mod commands;
pub mod config_file;
pub mod interrupt;
pub mod launcher;
pub mod logger;
pub mod menu;
pub mod messages;
pub mod prompt;
pub mod scaffold;

/// Load settings from a config file (or auto-detect one), applying a commands
/// directory override if given.
///
/// Without an explicit file and without one found in the current directory or its
/// parents, defaults are used relative to the current directory.
///
/// # Errors
///
/// Returns `ConfigError` if an explicit config file does not exist, a config file
/// cannot be parsed, or it contains invalid patterns.
pub fn load_settings(
    config_file: Option<&str>,
    commands_dir: Option<PathBuf>,
) -> Result<Settings, ConfigError> {
    let cwd = std::env::current_dir()
        .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            Some(config_path)
        }
        None => Config::find_config(&cwd),
    };

    let (config, base) = match config_path {
        Some(path) => {
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| cwd.clone(), |p| cwd.join(p));
            debug!(
                "Loading settings from {} (base: {})",
                path.display(),
                base.display()
            );
            (Config::from_file(&path)?, base)
        }
        None => {
            debug!("No config file found, using defaults");
            (Config::default(), cwd.clone())
        }
    };

    let mut settings = Settings::from_config(config, &base)?;
    if let Some(dir) = commands_dir {
        settings.commands_dir = resolve_dir(&cwd, dir);
    }
    debug!("Commands directory: {}", settings.commands_dir.display());
    Ok(settings)
}

fn resolve_dir(cwd: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_relative() {
        cwd.join(dir)
    } else {
        dir
    }
}
