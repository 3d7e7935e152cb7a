//! Run context passed through pipeline phases.

use std::path::PathBuf;

use serde::Serialize;

use super::diagnostic::{Diagnostic, Severity};
use crate::config::RunConfig;
use crate::generator::GeneratorSet;
use crate::source::{CompilationUnit, SourceParser};

/// Whether a run writes artifacts or only previews them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    Preview,
}

/// An artifact a preview run would have written.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewArtifact {
    pub path: String,
    pub content: String,
}

/// State accumulated across the discover, parse, and generate phases.
///
/// The configuration is only ever read; phases own the mutable state.
pub struct RunContext<'a> {
    pub config: &'a RunConfig,
    pub parser: &'a dyn SourceParser,
    pub generators: &'a GeneratorSet,
    pub mode: RunMode,

    /// Candidate files found by discovery, in deterministic order.
    pub candidates: Vec<PathBuf>,
    /// Parsed units that passed the package filter.
    pub units: Vec<CompilationUnit>,
    /// Artifact paths written, relative to the output root.
    pub written: Vec<String>,
    /// Artifact paths skipped under the clash policy.
    pub skipped: Vec<String>,
    /// Artifacts a preview run would have written.
    pub previewed: Vec<PreviewArtifact>,
    /// Triggers that did not fire, with the reason.
    pub skipped_triggers: Vec<String>,
    /// Triggers that fired a generator.
    pub triggers_fired: usize,
    /// Parse failures collected when the run is not failing fast.
    pub parse_failures: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Set when a phase hit a fatal condition; later phases do not run.
    pub aborted: bool,
}

impl<'a> RunContext<'a> {
    pub fn new(
        config: &'a RunConfig,
        parser: &'a dyn SourceParser,
        generators: &'a GeneratorSet,
        mode: RunMode,
    ) -> Self {
        Self {
            config,
            parser,
            generators,
            mode,
            candidates: Vec::new(),
            units: Vec::new(),
            written: Vec::new(),
            skipped: Vec::new(),
            previewed: Vec::new(),
            skipped_triggers: Vec::new(),
            triggers_fired: 0,
            parse_failures: Vec::new(),
            diagnostics: Vec::new(),
            aborted: false,
        }
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Record a fatal error and stop the pipeline after this phase.
    pub fn abort(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
        self.aborted = true;
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RunConfigBuilder;
    use crate::source::DeclarationScanner;

    use super::*;

    #[test]
    fn test_abort_records_error() {
        let config = RunConfigBuilder::defaults().build().unwrap();
        let parser = DeclarationScanner::new();
        let generators = GeneratorSet::new();
        let mut ctx = RunContext::new(&config, &parser, &generators, RunMode::Write);

        assert!(!ctx.has_errors());
        ctx.abort("parse", "boom");
        assert!(ctx.aborted);
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_warnings_filtered() {
        let config = RunConfigBuilder::defaults().build().unwrap();
        let parser = DeclarationScanner::new();
        let generators = GeneratorSet::new();
        let mut ctx = RunContext::new(&config, &parser, &generators, RunMode::Write);

        ctx.add_warning("discover", "odd entry");
        ctx.add_info("discover", "2 roots");
        assert_eq!(ctx.warnings().count(), 1);
        assert!(!ctx.has_errors());
    }
}
