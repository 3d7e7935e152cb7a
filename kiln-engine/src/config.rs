//! The immutable run configuration and its builder.
//!
//! Assembly is the fail-fast point: `build()` compiles every pattern and
//! match expression and validates the output root, so the engine either
//! receives a fully populated snapshot or nothing. The built config is a
//! value type, safe to read from any number of worker threads.

use std::path::{Path, PathBuf};

use kiln_core::{ClashStrategy, ExprError, Glob, MatchExpr, PatternError, RootSet};
use kiln_manifest::Schema;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::Diagnostic;
use crate::registry::BindingRegistry;

/// Optional language-version overrides; unset means inherit from the
/// ambient build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectOptions {
    pub source_version: Option<String>,
    pub target_version: Option<String>,
}

/// Configuration assembly failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no output root configured for generated sources")]
    MissingOutputRoot,

    #[error("invalid {what} pattern '{pattern}'")]
    Pattern {
        what: &'static str,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("invalid {what} expression '{expression}'")]
    Expression {
        what: &'static str,
        expression: String,
        #[source]
        source: ExprError,
    },
}

/// The finalized, immutable configuration for one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    resolution_roots: RootSet,
    scan_roots: RootSet,
    base_dir: PathBuf,
    scan_dir: Glob,
    packages: Glob,
    fail_on_parse_error: bool,
    clash_strategy: ClashStrategy,
    options: ProjectOptions,
    annotation_matcher: MatchExpr,
    generator_matcher: MatchExpr,
    output_root: PathBuf,
    bindings: BindingRegistry,
    skip: bool,
    warnings: Vec<Diagnostic>,
}

impl RunConfig {
    /// Everything usable for symbol resolution, binaries included.
    pub fn resolution_roots(&self) -> &RootSet {
        &self.resolution_roots
    }

    /// The search space for generation triggers.
    pub fn scan_roots(&self) -> &RootSet {
        &self.scan_roots
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn scan_dir(&self) -> &Glob {
        &self.scan_dir
    }

    pub fn packages(&self) -> &Glob {
        &self.packages
    }

    pub fn fail_on_parse_error(&self) -> bool {
        self.fail_on_parse_error
    }

    pub fn clash_strategy(&self) -> ClashStrategy {
        self.clash_strategy
    }

    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    pub fn annotation_matcher(&self) -> &MatchExpr {
        &self.annotation_matcher
    }

    pub fn generator_matcher(&self) -> &MatchExpr {
        &self.generator_matcher
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn skip(&self) -> bool {
        self.skip
    }

    /// Warnings produced during assembly (binding overrides and the like).
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Fluent accumulator for a [`RunConfig`].
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    resolution_roots: RootSet,
    scan_roots: RootSet,
    base_dir: PathBuf,
    scan_dir: String,
    packages: String,
    fail_on_parse_error: bool,
    clash_strategy: ClashStrategy,
    options: ProjectOptions,
    annotation_matches: String,
    generator_matches: String,
    output_root: Option<PathBuf>,
    generators: indexmap::IndexMap<String, String>,
    skip: bool,
    warnings: Vec<Diagnostic>,
}

impl RunConfigBuilder {
    /// An empty builder; `build()` fails until an output root is set.
    pub fn new() -> Self {
        Self {
            resolution_roots: RootSet::new(),
            scan_roots: RootSet::new(),
            base_dir: PathBuf::from("."),
            scan_dir: "**".to_string(),
            packages: "*".to_string(),
            fail_on_parse_error: true,
            clash_strategy: ClashStrategy::default(),
            options: ProjectOptions::default(),
            annotation_matches: "*".to_string(),
            generator_matches: "*".to_string(),
            output_root: None,
            generators: indexmap::IndexMap::new(),
            skip: false,
            warnings: Vec::new(),
        }
    }

    /// A builder with every optional field seeded to its default,
    /// including the conventional generated-source output location.
    pub fn defaults() -> Self {
        Self {
            output_root: Some(PathBuf::from("src/generated/java")),
            ..Self::new()
        }
    }

    pub fn roots(mut self, roots: RootSet) -> Self {
        self.resolution_roots = roots;
        self
    }

    pub fn scan_roots(mut self, roots: RootSet) -> Self {
        self.scan_roots = roots;
        self
    }

    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn scan_dir(mut self, pattern: impl Into<String>) -> Self {
        self.scan_dir = pattern.into();
        self
    }

    pub fn packages(mut self, pattern: impl Into<String>) -> Self {
        self.packages = pattern.into();
        self
    }

    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    pub fn clash_strategy(mut self, strategy: ClashStrategy) -> Self {
        self.clash_strategy = strategy;
        self
    }

    pub fn options(mut self, options: ProjectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn annotation_matches(mut self, expression: impl Into<String>) -> Self {
        self.annotation_matches = expression.into();
        self
    }

    pub fn generator_matches(mut self, expression: impl Into<String>) -> Self {
        self.generator_matches = expression.into();
        self
    }

    pub fn output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(output_root.into());
        self
    }

    /// Register a caller binding, last write wins with a warning.
    pub fn register_generator(
        mut self,
        annotation: impl Into<String>,
        generator: impl Into<String>,
    ) -> Self {
        let annotation = annotation.into();
        let generator = generator.into();
        if let Some(previous) = self.generators.insert(annotation.clone(), generator.clone()) {
            self.warnings.push(Diagnostic::warning(
                "config",
                format!(
                    "binding for '{annotation}' registered twice, '{generator}' replaces '{previous}'"
                ),
            ));
        }
        self
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Seed a builder from a parsed manifest.
    ///
    /// Root sets are not derived here; the caller resolves them through the
    /// catalog and attaches them with [`roots`](Self::roots) and
    /// [`scan_roots`](Self::scan_roots).
    pub fn from_manifest(schema: &Schema, base_dir: &Path) -> Self {
        let mut builder = Self::defaults()
            .base_dir(base_dir)
            .scan_dir(&schema.generate.scan_dir)
            .packages(&schema.generate.packages)
            .fail_on_parse_error(schema.generate.fail_on_parse_error)
            .clash_strategy(schema.generate.clash_strategy)
            .options(ProjectOptions {
                source_version: schema.generate.source_version.clone(),
                target_version: schema.generate.target_version.clone(),
            })
            .annotation_matches(&schema.generate.annotation_matches)
            .generator_matches(&schema.generate.generator_matches)
            .output_root(schema.output_root(base_dir))
            .skip(schema.generate.skip);
        for (annotation, generator) in &schema.generate.generators {
            builder = builder.register_generator(annotation, generator);
        }
        builder
    }

    /// Compile, validate, and freeze the configuration.
    ///
    /// Either a fully populated [`RunConfig`] comes back or an error does;
    /// nothing is written and no partially initialized value escapes.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let output_root = match self.output_root {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(ConfigError::MissingOutputRoot),
        };

        let scan_dir = Glob::path(&self.scan_dir).map_err(|source| ConfigError::Pattern {
            what: "scan-dir",
            pattern: self.scan_dir.clone(),
            source,
        })?;
        let packages = Glob::package(&self.packages).map_err(|source| ConfigError::Pattern {
            what: "package",
            pattern: self.packages.clone(),
            source,
        })?;

        let annotation_matcher =
            MatchExpr::compile(&self.annotation_matches).map_err(|source| {
                ConfigError::Expression {
                    what: "annotation",
                    expression: self.annotation_matches.clone(),
                    source,
                }
            })?;
        let generator_matcher =
            MatchExpr::compile(&self.generator_matches).map_err(|source| {
                ConfigError::Expression {
                    what: "generator",
                    expression: self.generator_matches.clone(),
                    source,
                }
            })?;

        let mut warnings = self.warnings;
        let mut bindings = BindingRegistry::new();
        for (annotation, generator) in self.generators {
            if let Some(previous) = bindings.register(&annotation, &generator) {
                warnings.push(Diagnostic::warning(
                    "config",
                    format!(
                        "binding for '{annotation}' overrides built-in '{previous}' with '{generator}'"
                    ),
                ));
            }
        }

        Ok(RunConfig {
            resolution_roots: self.resolution_roots,
            scan_roots: self.scan_roots,
            base_dir: self.base_dir,
            scan_dir,
            packages,
            fail_on_parse_error: self.fail_on_parse_error,
            clash_strategy: self.clash_strategy,
            options: self.options,
            annotation_matcher,
            generator_matcher,
            output_root,
            bindings,
            skip: self.skip,
            warnings,
        })
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::defaults()
    }
}
