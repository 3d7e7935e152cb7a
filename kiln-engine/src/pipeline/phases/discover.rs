//! Discovery: walk the scan roots for candidate source files.

use eyre::Result;
use kiln_core::filter_directories;
use walkdir::WalkDir;

use super::super::{Phase, RunContext};

/// Walks each scan root admitted by the scan-dir pattern and collects the
/// files the parser wants, in scan-root order then path order within a
/// root.
pub struct DiscoverPhase;

impl Phase for DiscoverPhase {
    fn name(&self) -> &'static str {
        "discover"
    }

    fn description(&self) -> &'static str {
        "walk scan roots for candidate source files"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let scan_roots =
            filter_directories(config.scan_roots(), config.scan_dir(), config.base_dir());

        if scan_roots.is_empty() {
            ctx.add_info(self.name(), "no scan roots match the configuration");
            return Ok(());
        }

        for root in &scan_roots {
            for entry in WalkDir::new(root.location()).sort_by_file_name() {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();
                        if entry.file_type().is_file() && ctx.parser.handles(path) {
                            ctx.candidates.push(path.to_path_buf());
                        }
                    }
                    Err(e) => {
                        ctx.add_warning(self.name(), format!("skipping unreadable entry: {e}"));
                    }
                }
            }
        }

        ctx.add_info(
            self.name(),
            format!(
                "{} candidate file(s) under {} scan root(s)",
                ctx.candidates.len(),
                scan_roots.len()
            ),
        );
        Ok(())
    }
}
