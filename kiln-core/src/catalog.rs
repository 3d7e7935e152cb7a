//! Root resolution and classification.
//!
//! The catalog turns the build tool's project model into two root sets: the
//! resolution set (everything usable for symbol resolution, binaries
//! included) and the scan set (source directories only, the search space
//! for generation triggers).

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::root::{Root, RootContent, RootOrigin, RootSet};

/// File extension that marks a classpath directory as holding source.
const SOURCE_EXTENSION: &str = "java";

/// The build tool could not supply a usable classpath.
///
/// Raised before any scanning begins, typically because dependency
/// resolution has not run yet.
#[derive(Debug, Error)]
#[error("cannot resolve project classpath: {reason}")]
pub struct ResolutionError {
    reason: String,
    #[source]
    source: Option<std::io::Error>,
}

impl ResolutionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn with_source(reason: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            reason: reason.into(),
            source: Some(source),
        }
    }
}

/// The build tool's project inputs, as plain path lists.
///
/// Loading the model is the point where [`ResolutionError`] surfaces; once
/// a model exists, catalog resolution is pure classification.
#[derive(Debug, Clone, Default)]
pub struct ProjectModel {
    pub main_source_dirs: Vec<PathBuf>,
    pub test_source_dirs: Vec<PathBuf>,
    pub compile_classpath: Vec<PathBuf>,
    pub test_classpath: Vec<PathBuf>,
    pub artifact_locations: Vec<PathBuf>,
}

/// Builds and classifies the root sets for a run.
pub struct RootCatalog;

impl RootCatalog {
    /// Resolve the full set of roots usable for symbol resolution.
    ///
    /// Merge order is fixed: main source dirs, test source dirs, compile
    /// classpath, test classpath, dependency artifacts. The first
    /// classification seen for a location wins; later duplicates are
    /// dropped silently.
    pub fn resolve(model: &ProjectModel) -> RootSet {
        let mut roots = RootSet::new();
        for dir in &model.main_source_dirs {
            roots.insert(source_root(dir));
        }
        for dir in &model.test_source_dirs {
            roots.insert(source_root(dir));
        }
        for entry in &model.compile_classpath {
            roots.insert(classpath_root(entry));
        }
        for entry in &model.test_classpath {
            roots.insert(classpath_root(entry));
        }
        for artifact in &model.artifact_locations {
            roots.insert(Root::new(
                artifact,
                RootOrigin::Dependency,
                RootContent::Binary,
                artifact.is_dir(),
            ));
        }
        roots
    }

    /// Resolve the scan set: the search space for generation triggers.
    ///
    /// Independent of [`RootCatalog::resolve`]. Only existing directories
    /// from the two source-directory lists qualify; classpath entries and
    /// binaries never appear here.
    pub fn resolve_scan_roots(model: &ProjectModel) -> RootSet {
        model
            .main_source_dirs
            .iter()
            .chain(&model.test_source_dirs)
            .filter(|dir| dir.is_dir())
            .map(|dir| Root::directory(dir, RootOrigin::Main, RootContent::Source))
            .collect()
    }
}

fn source_root(dir: &Path) -> Root {
    Root::new(dir, RootOrigin::Main, RootContent::Source, dir.is_dir())
}

fn classpath_root(entry: &Path) -> Root {
    // An existing directory holding source files can back source-level
    // resolution; everything else on the classpath is binary.
    let content = if entry.is_dir() && contains_source(entry) {
        RootContent::Source
    } else {
        RootContent::Binary
    };
    Root::new(entry, RootOrigin::Dependency, content, entry.is_dir())
}

fn contains_source(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if contains_source(&path) {
                return true;
            }
        } else if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            return true;
        }
    }
    false
}
