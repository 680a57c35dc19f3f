use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::commands::describe::extract_description;
use crate::commands::entry::Entry;

/// A command unit read from the commands directory
#[derive(Debug, Clone, Default)]
pub struct CommandUnit {
    pub id: String,
    pub path: PathBuf,
    pub description: Option<String>,
    pub entry: Option<Entry>,
}

impl CommandUnit {
    /// Read the unit source at `path` and work out its description and entry.
    ///
    /// # Errors
    ///
    /// Returns the underlying `io::Error` if the file cannot be read. Bytes that
    /// are not valid UTF-8 are replaced rather than rejected.
    pub fn load(
        id: &str,
        path: &Path,
        interpreters: &HashMap<String, String>,
    ) -> Result<Self, io::Error> {
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes);
        Ok(CommandUnit {
            id: id.to_string(),
            path: path.to_path_buf(),
            description: extract_description(&source),
            entry: Entry::resolve(path, &source, interpreters),
        })
    }
}
