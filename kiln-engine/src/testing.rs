//! Test doubles for driving the engine without a real front-end.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use kiln_core::{ClashStrategy, ProjectModel};
use tempfile::TempDir;

use crate::generator::{Artifact, Generator};
use crate::source::CompilationUnit;

/// A throwaway project tree on disk.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp project"),
        }
    }

    pub fn base_dir(&self) -> &Path {
        self.temp.path()
    }

    /// Write a source file at a project-relative path, creating parents.
    pub fn source_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(relative);
        fs::create_dir_all(path.parent().expect("source file has a parent"))
            .expect("create source dir");
        fs::write(&path, content).expect("write source file");
        path
    }

    /// A project model whose source dirs are the given relative paths.
    ///
    /// The directories are created so they qualify as scan roots.
    pub fn model(&self, source_dirs: &[&str]) -> ProjectModel {
        ProjectModel {
            main_source_dirs: source_dirs
                .iter()
                .map(|dir| {
                    let path = self.temp.path().join(dir);
                    fs::create_dir_all(&path).expect("create source dir");
                    path
                })
                .collect(),
            ..ProjectModel::default()
        }
    }

    /// The conventional output root inside the project.
    pub fn output_root(&self) -> PathBuf {
        self.temp.path().join("src/generated/java")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits one artifact per fired trigger, named after the unit and the
/// annotation's simple name, under the unit's package directory.
pub struct EchoGenerator {
    id: String,
    clash: Option<ClashStrategy>,
}

impl EchoGenerator {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            clash: None,
        }
    }

    pub fn with_clash_strategy(mut self, strategy: ClashStrategy) -> Self {
        self.clash = Some(strategy);
        self
    }
}

impl Generator for EchoGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn clash_strategy(&self) -> Option<ClashStrategy> {
        self.clash
    }

    fn generate(&self, unit: &CompilationUnit, annotation: &str) -> Result<Vec<Artifact>> {
        let stem = unit
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unit");
        let simple = annotation.rsplit('.').next().unwrap_or(annotation);
        let package_dir: PathBuf = unit
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        let path = package_dir.join(format!("{stem}{simple}.java"));
        let content = format!("// generated by '{}' for {annotation}\n", self.id);
        Ok(vec![Artifact::new(path, content)])
    }
}

/// Always fails; exercises generation-error handling.
pub struct FailingGenerator {
    id: String,
}

impl FailingGenerator {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Generator for FailingGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn generate(&self, _unit: &CompilationUnit, _annotation: &str) -> Result<Vec<Artifact>> {
        Err(eyre!("synthetic generator failure"))
    }
}
