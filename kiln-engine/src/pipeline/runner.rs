//! Pipeline orchestrator.

use eyre::Result;
use serde::Serialize;

use super::context::{PreviewArtifact, RunContext, RunMode};
use super::diagnostic::Diagnostic;
use super::phase::Phase;
use super::phases::{DiscoverPhase, GeneratePhase, ParsePhase};
use crate::config::RunConfig;
use crate::generator::GeneratorSet;
use crate::source::SourceParser;

/// Aggregate status of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Everything that should generate did.
    Success,
    /// The run completed but some units failed to parse.
    PartialFailure,
    /// The run aborted; see the error diagnostics.
    Fatal,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::PartialFailure => write!(f, "partial failure"),
            RunStatus::Fatal => write!(f, "fatal"),
        }
    }
}

/// What one generation run did.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    /// Whether the run was skipped outright by configuration.
    pub skipped_run: bool,
    pub units_scanned: usize,
    pub triggers_fired: usize,
    /// Artifact paths written, relative to the output root.
    pub written: Vec<String>,
    /// Artifact paths left untouched under the clash policy.
    pub skipped: Vec<String>,
    /// Artifacts a preview run would have written.
    pub previewed: Vec<PreviewArtifact>,
    /// Triggers that did not fire, with the reason.
    pub skipped_triggers: Vec<String>,
    pub parse_failures: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// The report for a run skipped by configuration: success, zero work.
    pub fn skipped_run() -> Self {
        Self {
            status: RunStatus::Success,
            skipped_run: true,
            units_scanned: 0,
            triggers_fired: 0,
            written: Vec::new(),
            skipped: Vec::new(),
            previewed: Vec::new(),
            skipped_triggers: Vec::new(),
            parse_failures: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Whether any output reached the filesystem.
    pub fn wrote_output(&self) -> bool {
        !self.written.is_empty()
    }
}

impl From<RunContext<'_>> for RunReport {
    fn from(ctx: RunContext<'_>) -> Self {
        let status = if ctx.aborted {
            RunStatus::Fatal
        } else if !ctx.parse_failures.is_empty() {
            RunStatus::PartialFailure
        } else {
            RunStatus::Success
        };
        Self {
            status,
            skipped_run: false,
            units_scanned: ctx.units.len(),
            triggers_fired: ctx.triggers_fired,
            written: ctx.written,
            skipped: ctx.skipped,
            previewed: ctx.previewed,
            skipped_triggers: ctx.skipped_triggers,
            parse_failures: ctx.parse_failures,
            diagnostics: ctx.diagnostics,
        }
    }
}

/// Executes the generation pipeline over one immutable configuration.
pub struct Engine;

impl Engine {
    /// Run discovery and generation.
    ///
    /// A configuration with `skip` set short-circuits before any
    /// filesystem access and reports success. Fatal conditions surface as
    /// a [`RunStatus::Fatal`] report; `Err` is reserved for failures the
    /// report cannot describe.
    pub fn run(
        config: &RunConfig,
        parser: &dyn SourceParser,
        generators: &GeneratorSet,
        mode: RunMode,
    ) -> Result<RunReport> {
        if config.skip() {
            return Ok(RunReport::skipped_run());
        }

        let mut ctx = RunContext::new(config, parser, generators, mode);
        ctx.diagnostics.extend(config.warnings().iter().cloned());

        let phases: [&dyn Phase; 3] = [&DiscoverPhase, &ParsePhase, &GeneratePhase];
        for phase in phases {
            phase.run(&mut ctx)?;
            if ctx.aborted {
                break;
            }
        }

        Ok(ctx.into())
    }
}
