use std::process::ExitCode;

use quick_cmd::commands::registry::Registry;
use quick_cmd::launcher::LaunchError;
use quick_cmd::menu::build_menu;

/// Print every menu label, one per line.
///
/// # Errors
///
/// Returns `LaunchError::NoCommands` if the commands directory has no commands.
pub fn run(registry: &mut Registry) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let menu = build_menu(registry);
    if menu.is_empty() {
        return Err(LaunchError::NoCommands(registry.dir().to_path_buf()).into());
    }
    for entry in menu {
        println!("{}", entry.label);
    }
    Ok(ExitCode::SUCCESS)
}
