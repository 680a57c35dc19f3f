//! The interactive selection prompt

use std::io;

use inquire::{InquireError, Select};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("unable to show the selection prompt: {0}")]
    Inquire(#[from] InquireError),
}

/// What the user did at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the labels that were offered
    Chosen(usize),
    Cancelled,
}

/// Presents labels and reports the user's choice.
pub trait Prompt {
    /// Show `labels` under `caption` with a navigation `hint`.
    ///
    /// # Errors
    ///
    /// Returns `PromptError` if the prompt cannot be shown at all.
    fn select(
        &mut self,
        caption: &str,
        hint: &str,
        labels: &[String],
    ) -> Result<Selection, PromptError>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn select(
        &mut self,
        caption: &str,
        hint: &str,
        labels: &[String],
    ) -> Result<Selection, PromptError> {
        (**self).select(caption, hint, labels)
    }
}

/// Arrow-key selection list on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompt;

impl Prompt for InquirePrompt {
    fn select(
        &mut self,
        caption: &str,
        hint: &str,
        labels: &[String],
    ) -> Result<Selection, PromptError> {
        match Select::new(caption, labels.to_vec())
            .with_help_message(hint)
            .raw_prompt()
        {
            Ok(choice) => Ok(Selection::Chosen(choice.index)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Selection::Cancelled)
            }
            // Nobody is there to answer: stdin is closed or not a terminal
            Err(InquireError::NotTTY) => Ok(Selection::Cancelled),
            Err(InquireError::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Ok(Selection::Cancelled)
            }
            Err(e) => Err(e.into()),
        }
    }
}
