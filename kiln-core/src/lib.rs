//! Core types for the Kiln source-generation orchestrator.
//!
//! This crate holds the value types and algorithms the rest of the
//! workspace is built on: the classified root model and its catalog,
//! ant-style glob matching, boolean wildcard match expressions, scan-set
//! filters, and the clash policy that mediates every generated write.

mod catalog;
mod clash;
mod expr;
mod glob;
mod root;
mod selector;

// Root model and resolution
pub use catalog::{ProjectModel, ResolutionError, RootCatalog};
pub use root::{Root, RootContent, RootOrigin, RootSet};
// Patterns and match expressions
pub use expr::{ExprError, MatchExpr};
pub use glob::{Glob, PatternError};
pub use selector::{filter_directories, package_matches};
// Clash policy
pub use clash::{ClashAction, ClashError, ClashStrategy, WriteOutcome, write_artifact};
