//! One interactive session: banner, menu, prompt, run the pick

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::{debug, info};
use thiserror::Error;

use crate::commands::registry::{Registry, RegistryError};
use crate::config_file::Settings;
use crate::interrupt::Interrupt;
use crate::menu::build_menu;
use crate::messages::Messages;
use crate::prompt::{Prompt, PromptError, Selection};

/// Errors that end a session with a failure exit code
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No commands found in {}. Add command files there to get started.", .0.display())]
    NoCommands(PathBuf),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("selection {0} is not in the menu")]
    InvalidSelection(usize),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// How a session ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user backed out of the prompt
    Cancelled,
    /// Ctrl+C while the session was running
    Interrupted,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Completed | Outcome::Cancelled | Outcome::Interrupted => ExitCode::SUCCESS,
        }
    }
}

pub struct Launcher<'a, P, W> {
    registry: &'a mut Registry,
    settings: &'a Settings,
    prompt: P,
    out: W,
    messages: Messages,
    interrupt: Interrupt,
}

impl<'a, P: Prompt, W: Write> Launcher<'a, P, W> {
    pub fn new(registry: &'a mut Registry, settings: &'a Settings, prompt: P, out: W) -> Self {
        Launcher {
            registry,
            settings,
            prompt,
            out,
            messages: Messages::plain(),
            interrupt: Interrupt::default(),
        }
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    #[must_use]
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run the session to completion.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::NoCommands` if nothing was discovered (no prompt is
    /// shown), `LaunchError::Prompt` if the prompt cannot be displayed, and
    /// `LaunchError::Registry` if the chosen command fails to run.
    pub fn run(&mut self) -> Result<Outcome, LaunchError> {
        writeln!(self.out, "{}", self.messages.banner(&self.settings.title))?;

        let menu = build_menu(self.registry);
        if menu.is_empty() {
            return Err(LaunchError::NoCommands(self.registry.dir().to_path_buf()));
        }
        if self.interrupt.is_set() {
            return self.stop(Outcome::Interrupted);
        }
        debug!("Offering {} command(s)", menu.len());

        let labels: Vec<String> = menu.iter().map(|entry| entry.label.clone()).collect();
        self.out.flush()?;
        let selection =
            self.prompt
                .select(&self.settings.prompt, &self.settings.hint, &labels)?;
        let Selection::Chosen(index) = selection else {
            return self.stop(Outcome::Cancelled);
        };
        let entry = menu
            .get(index)
            .ok_or(LaunchError::InvalidSelection(index))?;
        info!("Selected '{}'", entry.id);

        execute(
            self.registry,
            &entry.id,
            &mut self.out,
            self.messages,
            &self.interrupt,
        )
    }

    fn stop(&mut self, outcome: Outcome) -> Result<Outcome, LaunchError> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.messages.cancelled())?;
        Ok(outcome)
    }
}

/// Run one command between start and completion notices.
///
/// # Errors
///
/// Returns `LaunchError::Registry` if the command cannot be loaded, has no
/// entry, or fails while running.
pub fn execute(
    registry: &Registry,
    id: &str,
    out: &mut impl Write,
    messages: Messages,
    interrupt: &Interrupt,
) -> Result<Outcome, LaunchError> {
    writeln!(out)?;
    writeln!(out, "{}", messages.start(id))?;
    writeln!(out)?;
    writeln!(out, "{}", messages.rule())?;
    out.flush()?;

    let result = registry.invoke(id);
    if interrupt.is_set() {
        writeln!(out)?;
        writeln!(out, "{}", messages.cancelled())?;
        return Ok(Outcome::Interrupted);
    }
    result?;

    writeln!(out, "{}", messages.rule())?;
    writeln!(out)?;
    writeln!(out, "{}", messages.done())?;
    Ok(Outcome::Completed)
}
