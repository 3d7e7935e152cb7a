//! Pipeline phase trait.

use eyre::Result;

use super::RunContext;

/// One stage of a generation run.
///
/// Phases run in order and share the run context. A phase that hits a
/// fatal condition records an error diagnostic and marks the context
/// aborted; returning `Err` is reserved for unexpected failures the
/// context cannot describe.
pub trait Phase: Send + Sync {
    /// The name of this phase, used in diagnostics.
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()>;
}
