//! The `kiln.toml` configuration surface.
//!
//! One consolidated schema covers the project model handed over by the
//! build tool (source directories, classpaths, resolved artifacts) and the
//! generation options. Parsing retains the raw source so validation errors
//! carry labeled spans.

mod error;
mod file;
mod validate;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};
pub use file::KilnToml;
use indexmap::IndexMap;
use kiln_core::{ClashStrategy, Glob, MatchExpr, ProjectModel, ResolutionError};
use serde::Deserialize;

/// Root schema for kiln.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// The build project's layout and classpath
    #[serde(default)]
    pub project: ProjectConfig,

    /// Generation options
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// The `[project]` table: where sources and classpath elements live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub source_dirs: Vec<PathBuf>,
    pub test_source_dirs: Vec<PathBuf>,
    pub compile_classpath: Vec<PathBuf>,
    pub test_classpath: Vec<PathBuf>,
    /// One classpath element per line, produced by the build tool's
    /// dependency-resolution step.
    pub classpath_file: Option<PathBuf>,
    /// Resolved dependency artifact files (jars).
    pub artifacts: Vec<PathBuf>,
    pub output_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_dirs: vec![PathBuf::from("src/main/java")],
            test_source_dirs: vec![PathBuf::from("src/test/java")],
            compile_classpath: Vec::new(),
            test_classpath: Vec::new(),
            classpath_file: None,
            artifacts: Vec::new(),
            output_dir: "src/generated/java".to_string(),
        }
    }
}

/// The `[generate]` table: scanning, matching, and clash options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Package-name glob restricting which declared packages are scanned.
    pub packages: String,
    /// Directory ant-glob restricting which scan roots are searched.
    pub scan_dir: String,
    pub fail_on_parse_error: bool,
    pub clash_strategy: ClashStrategy,
    /// When true the whole run is a no-op reporting success.
    pub skip: bool,
    /// Boolean match expression over trigger annotation names.
    pub annotation_matches: String,
    /// Boolean match expression over generator identifiers.
    pub generator_matches: String,
    pub source_version: Option<String>,
    pub target_version: Option<String>,
    /// Caller bindings: annotation full name -> generator identifier.
    /// These layer over the built-in bindings, last write wins.
    pub generators: IndexMap<String, String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            packages: "*".to_string(),
            scan_dir: "**".to_string(),
            fail_on_parse_error: true,
            clash_strategy: ClashStrategy::default(),
            skip: false,
            annotation_matches: "*".to_string(),
            generator_matches: "*".to_string(),
            source_version: None,
            target_version: None,
            generators: IndexMap::new(),
        }
    }
}

impl Schema {
    /// Validate the schema after parsing.
    ///
    /// Patterns and match expressions are compiled here so a malformed one
    /// fails during configuration assembly, before any filesystem
    /// interaction.
    pub fn validate(&self, src: &str, filename: &str) -> Result<()> {
        if self.project.output_dir.trim().is_empty() {
            return Err(Error::validation(
                "output_dir must not be empty",
                src,
                filename,
                validate::find_key_span(src, "output_dir"),
            ));
        }

        let patterns = [
            ("package pattern", self.generate.packages.as_str()),
            ("scan-dir pattern", self.generate.scan_dir.as_str()),
        ];
        for (what, value) in patterns {
            let compiled = if what == "package pattern" {
                Glob::package(value)
            } else {
                Glob::path(value)
            };
            if let Err(e) = compiled {
                return Err(Error::invalid_pattern(
                    what,
                    value,
                    e.to_string(),
                    src,
                    filename,
                    validate::find_str_span(src, value),
                ));
            }
        }

        let expressions = [
            ("annotation match expression", self.generate.annotation_matches.as_str()),
            ("generator match expression", self.generate.generator_matches.as_str()),
        ];
        for (what, value) in expressions {
            if let Err(e) = MatchExpr::compile(value) {
                return Err(Error::invalid_pattern(
                    what,
                    value,
                    e.to_string(),
                    src,
                    filename,
                    validate::find_str_span(src, value),
                ));
            }
        }

        for (annotation, generator) in &self.generate.generators {
            if annotation.trim().is_empty() || generator.trim().is_empty() {
                return Err(Error::validation(
                    "generator bindings need a non-empty annotation name and generator id",
                    src,
                    filename,
                    validate::find_str_span(src, generator),
                ));
            }
        }

        Ok(())
    }

    /// Build the project model, resolving relative paths against `base_dir`.
    ///
    /// A configured `classpath_file` that cannot be read surfaces as a
    /// resolution error: the build tool has not supplied the classpath yet.
    pub fn project_model(&self, base_dir: &Path) -> Result<ProjectModel> {
        let resolve = |p: &PathBuf| -> PathBuf {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        };

        let mut compile_classpath: Vec<PathBuf> =
            self.project.compile_classpath.iter().map(resolve).collect();
        if let Some(file) = &self.project.classpath_file {
            let file = resolve(file);
            let content = std::fs::read_to_string(&file).map_err(|e| {
                Error::resolution(ResolutionError::with_source(
                    format!("classpath file '{}' is unavailable", file.display()),
                    e,
                ))
            })?;
            compile_classpath.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from),
            );
        }

        Ok(ProjectModel {
            main_source_dirs: self.project.source_dirs.iter().map(resolve).collect(),
            test_source_dirs: self.project.test_source_dirs.iter().map(resolve).collect(),
            compile_classpath,
            test_classpath: self.project.test_classpath.iter().map(resolve).collect(),
            artifact_locations: self.project.artifacts.iter().map(resolve).collect(),
        })
    }

    /// The output root for generated sources, resolved against `base_dir`.
    pub fn output_root(&self, base_dir: &Path) -> PathBuf {
        let dir = Path::new(&self.project.output_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            base_dir.join(dir)
        }
    }
}

/// Parse a kiln.toml file from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}

/// Parse a kiln.toml from a string (uses "kiln.toml" as default filename)
pub fn parse_str(content: &str) -> Result<Schema> {
    parse_str_with_filename(content, "kiln.toml")
}

/// Parse a kiln.toml from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Schema> {
    let schema: Schema = toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;

    schema.validate(content, filename)?;
    Ok(schema)
}
