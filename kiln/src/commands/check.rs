use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use kiln_manifest::KilnToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to kiln.toml (defaults to ./kiln.toml)
    #[arg(short, long, default_value = "kiln.toml")]
    pub config: PathBuf,

    /// Project base directory relative paths resolve against
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Emit the check report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = KilnToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&manifest, &self.base_dir);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
