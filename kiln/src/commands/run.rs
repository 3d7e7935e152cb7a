use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use kiln_core::ClashStrategy;
use kiln_engine::{GeneratorSet, RunReport, RunStatus};
use kiln_manifest::KilnToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, RunOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RunCommand {
    /// Path to kiln.toml (defaults to ./kiln.toml)
    #[arg(short, long, default_value = "kiln.toml")]
    pub config: PathBuf,

    /// Project base directory relative paths resolve against
    #[arg(short, long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Output directory for generated sources (overrides kiln.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Package-name glob restricting scanning (overrides kiln.toml)
    #[arg(long)]
    pub packages: Option<String>,

    /// Directory ant-glob restricting scanning (overrides kiln.toml)
    #[arg(long)]
    pub scan_dir: Option<String>,

    /// Clash strategy: skip, overwrite, or fail (overrides kiln.toml)
    #[arg(long)]
    pub clash: Option<ClashStrategy>,

    /// Preview generated artifacts without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunCommand {
    /// Run the run command
    pub fn run(&self) -> Result<()> {
        let manifest = KilnToml::open(&self.config).unwrap_or_exit();
        let schema = manifest.schema();

        // The cheapest possible escape hatch: nothing is loaded, resolved,
        // or compiled when the manifest says skip.
        if schema.generate.skip {
            return self.finish(RunReport::skipped_run());
        }

        let model = schema.project_model(&self.base_dir).unwrap_or_exit();
        let opts = RunOptions {
            base_dir: &self.base_dir,
            output: self.output.as_deref(),
            packages: self.packages.as_deref(),
            scan_dir: self.scan_dir.as_deref(),
            clash: self.clash,
            dry_run: self.dry_run,
        };

        // The binary links no emission engines; generators plug in through
        // the library seam.
        let report = ops::run(schema, &model, &GeneratorSet::new(), &opts)?;
        self.finish(report)
    }

    fn finish(&self, report: RunReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if report.status == RunStatus::Fatal {
            std::process::exit(1);
        }
        Ok(())
    }
}
