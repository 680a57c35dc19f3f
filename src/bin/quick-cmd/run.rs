use std::process::ExitCode;

use clap::Args;

use quick_cmd::commands::registry::Registry;
use quick_cmd::interrupt::Interrupt;
use quick_cmd::launcher::execute;
use quick_cmd::menu::identifier_from_label;
use quick_cmd::messages::Messages;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command name, or a full menu label as printed by `list`
    command: String,
}

/// Run a single command without showing the menu.
///
/// # Errors
///
/// Returns an error if the command cannot be loaded, has no entry, or fails.
pub fn run(
    args: &RunArgs,
    registry: &mut Registry,
    messages: Messages,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let interrupt = Interrupt::install()?;
    registry.discover();
    let id = identifier_from_label(&args.command);
    let outcome = execute(
        registry,
        id,
        &mut std::io::stdout().lock(),
        messages,
        &interrupt,
    )?;
    Ok(outcome.exit_code())
}
