mod list;
mod new;
mod run;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use quick_cmd::commands::registry::Registry;
use quick_cmd::interrupt::Interrupt;
use quick_cmd::launcher::Launcher;
use quick_cmd::load_settings;
use quick_cmd::messages::Messages;
use quick_cmd::prompt::InquirePrompt;

#[derive(Parser, Debug)]
#[command(
    name = "quick-cmd",
    version,
    about = "Interactive launcher for the scripts in a commands directory"
)]
struct Cli {
    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to scan for commands (overrides the config file)
    #[arg(short = 'd', long, env = "QUICK_CMD_DIR")]
    commands_dir: Option<PathBuf>,

    /// Log file path (logs also go to stderr, filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the menu entries without prompting
    List,
    /// Run one command by name without prompting
    Run(run::RunArgs),
    /// Create a new command from a template
    New(new::NewArgs),
}

fn main() -> ExitCode {
    let messages = Messages::for_stdout();
    match run(messages) {
        Ok(code) => code,
        Err(e) => {
            println!();
            println!("{}", messages.error(&e));
            let _ = std::io::stdout().flush();
            ExitCode::FAILURE
        }
    }
}

fn run(messages: Messages) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    quick_cmd::logger::init(log_file)?;

    let settings = load_settings(cli.config.as_deref(), cli.commands_dir)?;
    let mut registry = Registry::new(&settings);

    match cli.command {
        Some(Commands::List) => list::run(&mut registry),
        Some(Commands::Run(ref args)) => run::run(args, &mut registry, messages),
        Some(Commands::New(ref args)) => new::run(args, &settings),
        None => {
            let interrupt = Interrupt::install()?;
            let outcome = Launcher::new(
                &mut registry,
                &settings,
                InquirePrompt,
                std::io::stdout().lock(),
            )
            .with_messages(messages)
            .with_interrupt(interrupt)
            .run()?;
            Ok(outcome.exit_code())
        }
    }
}
