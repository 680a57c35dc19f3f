use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::menu::LABEL_SEPARATOR;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("invalid command name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("command file already exists at {0} (use --force to overwrite)")]
    Exists(PathBuf),

    #[error("failed to write command: {0}")]
    Io(#[from] std::io::Error),
}

const TEMPLATE: &str = "\
#!/bin/sh
# {name}: describe what this command does in one line
#
# The first line of this comment is shown in the quick-cmd menu.
# The script runs when it is selected; anything it prints is shown as is.

set -e

echo \"This is the {name} command.\"
echo \"Current time: $(date '+%Y-%m-%d %H:%M:%S')\"
";

/// Check that `name` can be used as a command identifier.
///
/// # Errors
///
/// Returns `ScaffoldError::InvalidName` describing the first rule it breaks.
pub fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.starts_with('_') {
        Some("names starting with '_' are ignored by the launcher")
    } else if name.starts_with('.') {
        Some("hidden files are ignored by the launcher")
    } else if name.contains(LABEL_SEPARATOR) {
        Some("name cannot contain ' - '")
    } else if name.contains(['/', '\\']) {
        Some("name cannot contain path separators")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(ScaffoldError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Write a template command named `name` into `commands_dir`.
///
/// A trailing `.sh` on `name` is dropped, so `deploy.sh` and `deploy` both
/// create `deploy.sh`.
///
/// # Errors
///
/// Returns `ScaffoldError::InvalidName` for unusable names,
/// `ScaffoldError::Exists` if the file exists (unless `force` is set),
/// or `ScaffoldError::Io` on write failure.
pub fn run(commands_dir: &Path, name: &str, force: bool) -> Result<PathBuf, ScaffoldError> {
    let name = name.strip_suffix(".sh").unwrap_or(name);
    validate_name(name)?;
    let path = commands_dir.join(format!("{name}.sh"));

    if path.exists() && !force {
        return Err(ScaffoldError::Exists(path));
    }

    std::fs::create_dir_all(commands_dir)?;
    std::fs::write(&path, TEMPLATE.replace("{name}", name))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o755);
        std::fs::set_permissions(&path, perms)?;
    }

    info!("Created command template at {}", path.display());
    Ok(path)
}
