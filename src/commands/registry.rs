use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, info, warn};
use thiserror::Error;

use crate::commands::entry::RunError;
use crate::commands::unit::CommandUnit;
use crate::config_file::Settings;
use crate::menu::LABEL_SEPARATOR;

/// Errors surfaced when invoking a command unit
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to load command '{id}': {source}")]
    Load {
        id: String,
        #[source]
        source: io::Error,
    },
    #[error(
        "command '{id}' has no entry point (add a `#!` line or configure an interpreter for it)"
    )]
    Contract { id: String },
    #[error("command '{id}' failed: {source}")]
    Execution {
        id: String,
        #[source]
        source: RunError,
    },
}

/// Maps command identifiers to the unit sources found in the commands directory
#[derive(Debug, Clone)]
pub struct Registry {
    dir: PathBuf,
    patterns: Vec<Pattern>,
    interpreters: HashMap<String, String>,
    units: BTreeMap<String, PathBuf>,
}

impl Registry {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Registry {
            dir: settings.commands_dir.clone(),
            patterns: settings.patterns.clone(),
            interpreters: settings.interpreters.clone(),
            units: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the commands directory and return the identifiers found, sorted.
    ///
    /// A missing or unreadable directory yields no identifiers.
    pub fn discover(&mut self) -> Vec<String> {
        self.units = scan(&self.dir, &self.patterns);
        debug!(
            "Discovered {} command(s) in {}",
            self.units.len(),
            self.dir.display()
        );
        self.units.keys().cloned().collect()
    }

    /// Documentation text of a unit, or `None` if it has none or cannot be loaded.
    #[must_use]
    pub fn describe(&self, id: &str) -> Option<String> {
        match self.load(id) {
            Ok(unit) => unit.description,
            Err(e) => {
                debug!("No description for '{id}': {e}");
                None
            }
        }
    }

    /// Load the unit named `id` from the last discovery pass.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Load` if the identifier is unknown or its file
    /// cannot be read.
    pub fn load(&self, id: &str) -> Result<CommandUnit, RegistryError> {
        let path = self.units.get(id).ok_or_else(|| RegistryError::Load {
            id: id.to_string(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such command in {}", self.dir.display()),
            ),
        })?;
        CommandUnit::load(id, path, &self.interpreters).map_err(|source| RegistryError::Load {
            id: id.to_string(),
            source,
        })
    }

    /// Run the unit named `id`, passing its output straight through.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Load` if the unit cannot be loaded,
    /// `RegistryError::Contract` if it declares no entry, or
    /// `RegistryError::Execution` if running it fails.
    pub fn invoke(&self, id: &str) -> Result<(), RegistryError> {
        let unit = self.load(id)?;
        let entry = unit.entry.as_ref().ok_or_else(|| RegistryError::Contract {
            id: id.to_string(),
        })?;
        info!("Invoking '{id}' with {}", entry.program);
        entry
            .run(&unit.path)
            .map_err(|source| RegistryError::Execution {
                id: id.to_string(),
                source,
            })
    }
}

fn is_eligible(name: &str, patterns: &[Pattern]) -> bool {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    !name.starts_with('_') && patterns.iter().any(|p| p.matches_with(name, options))
}

fn scan(dir: &Path, patterns: &[Pattern]) -> BTreeMap<String, PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Commands directory {} not readable: {e}", dir.display());
            return BTreeMap::new();
        }
    };

    let mut files: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| Some((entry.file_name().into_string().ok()?, entry.path())))
        .filter(|(name, _)| is_eligible(name, patterns))
        .collect();
    files.sort();

    let mut units: BTreeMap<String, PathBuf> = BTreeMap::new();
    for (name, path) in files {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if id.contains(LABEL_SEPARATOR) {
            warn!("Skipping {name}: command names cannot contain '{LABEL_SEPARATOR}'");
            continue;
        }
        if let Some(existing) = units.get(id) {
            warn!(
                "Skipping {name}: '{id}' is already provided by {}",
                existing.display()
            );
            continue;
        }
        units.insert(id.to_string(), path);
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_for(dir: &Path) -> Registry {
        Registry::new(&Settings::with_commands_dir(dir))
    }

    fn touch(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "zeta.sh", "#!/bin/sh\n");
        touch(dir.path(), "alpha.py", "#!/usr/bin/env python3\n");
        touch(dir.path(), "_private.sh", "#!/bin/sh\n");
        touch(dir.path(), "notes.txt", "not a command\n");
        touch(dir.path(), ".hidden.sh", "#!/bin/sh\n");
        std::fs::create_dir(dir.path().join("nested.sh")).unwrap();

        let mut registry = registry_for(dir.path());
        assert_eq!(registry.discover(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_discover_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry_for(&dir.path().join("does-not-exist"));
        assert!(registry.discover().is_empty());
    }

    #[test]
    fn test_discover_skips_duplicate_stems() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "backup.py", "#!/usr/bin/env python3\n");
        touch(dir.path(), "backup.sh", "#!/bin/sh\n");
        let mut registry = registry_for(dir.path());
        assert_eq!(registry.discover(), vec!["backup"]);
        let unit = registry.load("backup").unwrap();
        assert_eq!(unit.path, dir.path().join("backup.py"));
    }

    #[test]
    fn test_discover_rejects_separator_in_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a - b.sh", "#!/bin/sh\n");
        touch(dir.path(), "ok.sh", "#!/bin/sh\n");
        let mut registry = registry_for(dir.path());
        assert_eq!(registry.discover(), vec!["ok"]);
    }

    #[test]
    fn test_describe_returns_full_text() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.sh", "#!/bin/sh\necho hi\n");
        touch(
            dir.path(),
            "doc.sh",
            "#!/bin/sh\n# Back up files.\n# Details...\necho hi\n",
        );
        let mut registry = registry_for(dir.path());
        registry.discover();
        assert_eq!(registry.describe("plain"), None);
        assert_eq!(
            registry.describe("doc").as_deref(),
            Some("Back up files.\nDetails...")
        );
        assert_eq!(registry.describe("missing"), None);
    }

    #[test]
    fn test_invoke_unknown_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = registry_for(dir.path());
        registry.discover();
        match registry.invoke("ghost") {
            Err(RegistryError::Load { id, .. }) => assert_eq!(id, "ghost"),
            other => panic!("Expected RegistryError::Load, got: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_without_entry_is_contract_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bare.sh", "echo 'should not run'\n");
        let mut registry = registry_for(dir.path());
        registry.discover();
        match registry.invoke("bare") {
            Err(RegistryError::Contract { id }) => assert_eq!(id, "bare"),
            other => panic!("Expected RegistryError::Contract, got: {other:?}"),
        }
    }

    #[test]
    fn test_invoke_failure_wraps_message() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            "full.sh",
            "#!/bin/sh\necho 'disk full' >&2\nexit 1\n",
        );
        let mut registry = registry_for(dir.path());
        registry.discover();
        let err = registry.invoke("full").unwrap_err();
        assert!(matches!(err, RegistryError::Execution { .. }));
        assert_eq!(err.to_string(), "command 'full' failed: disk full");
    }

    #[test]
    fn test_invoke_success_runs_script() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran.txt");
        touch(
            dir.path(),
            "mark.sh",
            &format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
        );
        let mut registry = registry_for(dir.path());
        registry.discover();
        registry.invoke("mark").unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_non_utf8_source_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran.txt");
        let mut source = b"#!/bin/sh\n# Caf\xe9 backup\n".to_vec();
        source.extend(format!("touch '{}'\n", marker.display()).into_bytes());
        std::fs::write(dir.path().join("latin.sh"), source).unwrap();

        let mut registry = registry_for(dir.path());
        assert_eq!(registry.discover(), vec!["latin".to_string()]);
        let description = registry.describe("latin").unwrap();
        assert!(description.starts_with("Caf"));
        assert!(description.ends_with(" backup"));
        registry.invoke("latin").unwrap();
        assert!(marker.exists());
    }

    #[test]
    fn test_configured_interpreter_provides_entry() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran.txt");
        touch(
            dir.path(),
            "noshebang.sh",
            &format!("touch '{}'\n", marker.display()),
        );
        let mut settings = Settings::with_commands_dir(dir.path());
        settings
            .interpreters
            .insert("sh".to_string(), "sh".to_string());
        let mut registry = Registry::new(&settings);
        registry.discover();
        registry.invoke("noshebang").unwrap();
        assert!(marker.exists());
    }
}
