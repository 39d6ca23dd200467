mod args;
mod check;
mod clean;
mod completions;
mod generate;
mod list;

use std::io::IsTerminal;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use list::ListCommand;
use tracing_subscriber::EnvFilter;

/// Extension trait for exiting on pass errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for xschema_build::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "xschema")]
#[command(version)]
#[command(about = "Generate Rust sources from schema files")]
pub(crate) struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.init_tracing();

        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    /// Log to stderr so stdout stays free for reports and cargo directives.
    fn init_tracing(&self) {
        let level = if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .init();
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sources from the schema directory
    Generate(GenerateCommand),

    /// List the schema files a pass would pick up
    List(ListCommand),

    /// Validate schema files without generating code
    Check(CheckCommand),

    /// Remove the generated output directories
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
