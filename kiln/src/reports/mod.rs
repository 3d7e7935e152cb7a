//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from
//! rendering. Commands build reports, then render them to an Output target;
//! `--json` serializes the same data instead.

mod check;
mod info;
mod output;
mod run;

pub use check::CheckReport;
pub use info::{Binding, InfoReport, RootEntry};
pub use output::{Report, TerminalOutput};
