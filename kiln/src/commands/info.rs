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
pub struct InfoCommand {
    /// Path to kiln.toml (defaults to ./kiln.toml)
    #[arg(short, long, default_value = "kiln.toml")]
    pub config: PathBuf,

    /// Project base directory relative paths resolve against
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Emit the info report as JSON
    #[arg(long)]
    pub json: bool,
}

impl InfoCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = KilnToml::open(&self.config).unwrap_or_exit();
        let schema = manifest.schema();
        let model = schema.project_model(&self.base_dir).unwrap_or_exit();

        let report = ops::info(schema, &model, &self.base_dir)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
