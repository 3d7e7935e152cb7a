//! The Kiln generation engine.
//!
//! This crate turns a resolved project model into one immutable
//! [`RunConfig`] and executes the generation pipeline over it: discover
//! candidate files under the scan roots, parse them into compilation
//! units, fire the triggers admitted by the match expressions, and write
//! each proposed artifact through the clash policy.
//!
//! Parsing and code emission stay behind the [`SourceParser`] and
//! [`Generator`] seams; the engine itself never inspects syntax beyond
//! what discovery needs.

pub mod config;
pub mod generator;
pub mod pipeline;
pub mod registry;
pub mod source;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ConfigError, ProjectOptions, RunConfig, RunConfigBuilder};
pub use generator::{Artifact, GenerationError, Generator, GeneratorSet};
pub use pipeline::{
    Diagnostic, Engine, PreviewArtifact, RunMode, RunReport, RunStatus, Severity,
};
pub use registry::{BUILTIN_BINDINGS, BindingRegistry};
pub use source::{CompilationUnit, DeclarationScanner, ParseError, SourceParser};
