mod check;
mod completions;
mod info;
mod run;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use info::InfoCommand;
use run::RunCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for kiln_manifest::Result<T> {
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
#[command(name = "kiln")]
#[command(version)]
#[command(about = "Prepare and launch annotation-driven source generation for a build")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Run(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve roots, scan for triggers, and generate sources
    Run(RunCommand),

    /// Validate kiln.toml and the assembled run configuration
    Check(CheckCommand),

    /// Show the resolved roots, bindings, and effective options
    Info(InfoCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
