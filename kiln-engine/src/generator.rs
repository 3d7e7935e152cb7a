//! The generation seam: what a generator implementation looks like to the
//! engine, and the set of implementations linked into a run.
//!
//! How a generator produces code is its own business; the engine only sees
//! proposed artifacts and mediates every write through the clash policy.

use std::path::PathBuf;

use eyre::Result;
use indexmap::IndexMap;
use kiln_core::ClashStrategy;
use thiserror::Error;

use crate::source::CompilationUnit;

/// A proposed generated file, relative to the run's output root.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// A code generator bound to one or more trigger annotations.
pub trait Generator: Send + Sync {
    /// The identifier the binding registry and generator matcher see.
    fn id(&self) -> &str;

    /// Per-generator clash override; the run default applies when `None`.
    fn clash_strategy(&self) -> Option<ClashStrategy> {
        None
    }

    /// Produce artifacts for one fired trigger.
    ///
    /// # Errors
    ///
    /// A generator failure is fatal for the run and is reported with the
    /// triggering annotation, source location, and generator identifier.
    fn generate(&self, unit: &CompilationUnit, annotation: &str) -> Result<Vec<Artifact>>;
}

/// The generator implementations linked into this process, keyed by id.
#[derive(Default)]
pub struct GeneratorSet {
    generators: IndexMap<String, Box<dyn Generator>>,
}

impl GeneratorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation, keyed by its id. Last write wins.
    pub fn register(&mut self, generator: impl Generator + 'static) {
        self.generators
            .insert(generator.id().to_string(), Box::new(generator));
    }

    pub fn get(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(Box::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl std::fmt::Debug for GeneratorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorSet")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

/// A bound generator failed while producing artifacts.
#[derive(Debug, Error)]
#[error("generator '{generator}' failed for '{annotation}' at '{}': {cause}", location.display())]
pub struct GenerationError {
    pub generator: String,
    pub annotation: String,
    pub location: PathBuf,
    pub cause: String,
}
