use std::process::ExitCode;

use clap::Args;

use quick_cmd::config_file::Settings;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the command (becomes `<NAME>.sh`)
    name: String,

    /// Overwrite an existing command file
    #[arg(long)]
    force: bool,
}

/// Write a template command into the commands directory.
///
/// # Errors
///
/// Returns an error if the name is unusable or the file cannot be written.
pub fn run(args: &NewArgs, settings: &Settings) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let path = quick_cmd::scaffold::run(&settings.commands_dir, &args.name, args.force)?;
    println!("Created {}", path.display());
    Ok(ExitCode::SUCCESS)
}
