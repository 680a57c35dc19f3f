use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus, Stdio};

use log::debug;
use thiserror::Error;

/// Reasons a unit's entry operation did not complete successfully
#[derive(Error, Debug)]
pub enum RunError {
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// Last non-empty line the command wrote to stderr before failing
    #[error("{0}")]
    Failed(String),
    #[error("exited with {0}")]
    Status(ExitStatus),
    #[error("lost track of the command: {0}")]
    Io(#[from] io::Error),
}

/// How a unit is started: an interpreter that receives the script path as its last argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub program: String,
    pub args: Vec<String>,
}

impl Entry {
    /// Resolve the entry for the script at `path`.
    ///
    /// An interpreter configured for the file extension wins over the
    /// script's own `#!` line. `None` means the unit declares no entry.
    #[must_use]
    pub fn resolve(
        path: &Path,
        source: &str,
        interpreters: &HashMap<String, String>,
    ) -> Option<Entry> {
        path.extension()
            .and_then(OsStr::to_str)
            .and_then(|ext| interpreters.get(ext))
            .and_then(|cmd| Self::from_command_line(cmd))
            .or_else(|| Self::from_shebang(source))
    }

    #[must_use]
    pub fn from_shebang(source: &str) -> Option<Entry> {
        let line = source.lines().next()?.strip_prefix("#!")?;
        Self::from_command_line(line)
    }

    fn from_command_line(line: &str) -> Option<Entry> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Entry {
            program,
            args: parts.map(ToString::to_string).collect(),
        })
    }

    /// Run `script` through this entry.
    ///
    /// Stdin and stdout are shared with the launcher. Stderr is forwarded line
    /// by line so the last line can be reported if the command fails.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Spawn` if the interpreter cannot be started, and
    /// `RunError::Failed`/`RunError::Status` if it exits unsuccessfully.
    pub fn run(&self, script: &Path) -> Result<(), RunError> {
        debug!(
            "Starting `{} {}` for {}",
            self.program,
            self.args.join(" "),
            script.display()
        );
        let mut child = ProcessCommand::new(&self.program)
            .args(&self.args)
            .arg(script)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let last_line = child
            .stderr
            .take()
            .and_then(|stderr| forward_lines(stderr, &mut io::stderr().lock()));
        let status = child.wait()?;
        debug!("{} exited with {status}", script.display());

        if status.success() {
            Ok(())
        } else {
            Err(last_line.map_or(RunError::Status(status), RunError::Failed))
        }
    }
}

/// Copy `input` to `out` line by line, returning the last non-empty line.
///
/// The input is always read to the end so the child never blocks on a full
/// pipe; forwarding stops at the first write error.
fn forward_lines(input: impl Read, out: &mut impl Write) -> Option<String> {
    let mut forwarding = true;
    let mut last_line = None;
    for chunk in BufReader::new(input).split(b'\n') {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                debug!("Stopped reading command stderr: {e}");
                break;
            }
        };
        if forwarding {
            if let Err(e) = out.write_all(&chunk).and_then(|()| out.write_all(b"\n")) {
                debug!("Stopped forwarding command stderr: {e}");
                forwarding = false;
            }
        }
        let line = String::from_utf8_lossy(&chunk);
        let line = line.trim();
        if !line.is_empty() {
            last_line = Some(line.to_string());
        }
    }
    if forwarding {
        let _ = out.flush();
    }
    last_line
}
