//! Parsing: turn candidates into units and apply the package filter.

use eyre::Result;
use kiln_core::package_matches;

use super::super::{Phase, RunContext};

/// Parses every discovered candidate and keeps the units whose declared
/// package passes the package pattern. A parse failure aborts the run when
/// the configuration fails fast, and is collected otherwise.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "parse candidates and filter by declared package"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let candidates = std::mem::take(&mut ctx.candidates);

        for path in candidates {
            match ctx.parser.parse(&path) {
                Ok(unit) => {
                    if package_matches(config.packages(), &unit.package) {
                        ctx.units.push(unit);
                    }
                }
                Err(e) => {
                    if config.fail_on_parse_error() {
                        ctx.abort(self.name(), e.to_string());
                        return Ok(());
                    }
                    ctx.parse_failures.push(e.to_string());
                    ctx.add_warning(self.name(), e.to_string());
                }
            }
        }

        Ok(())
    }
}
