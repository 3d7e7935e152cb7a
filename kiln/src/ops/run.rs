//! Run operation - configuration assembly and generation.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use kiln_core::{ClashStrategy, ProjectModel, RootCatalog};
use kiln_engine::{
    DeclarationScanner, Engine, GeneratorSet, RunConfigBuilder, RunMode, RunReport,
};
use kiln_manifest::Schema;

/// CLI-level overrides layered on top of the manifest.
#[derive(Debug)]
pub struct RunOptions<'a> {
    pub base_dir: &'a Path,
    pub output: Option<&'a Path>,
    pub packages: Option<&'a str>,
    pub scan_dir: Option<&'a str>,
    pub clash: Option<ClashStrategy>,
    /// Preview artifacts without writing them.
    pub dry_run: bool,
}

/// Execute the run operation.
///
/// Resolves the root sets through the catalog, assembles the immutable run
/// configuration (manifest first, CLI overrides second), and hands it to
/// the engine. The `skip` escape hatch is handled by the caller before the
/// model is even loaded.
pub fn run(
    schema: &Schema,
    model: &ProjectModel,
    generators: &GeneratorSet,
    opts: &RunOptions<'_>,
) -> Result<RunReport> {
    let roots = RootCatalog::resolve(model);
    let scan_roots = RootCatalog::resolve_scan_roots(model);

    let mut builder = RunConfigBuilder::from_manifest(schema, opts.base_dir)
        .roots(roots)
        .scan_roots(scan_roots);
    if let Some(output) = opts.output {
        builder = builder.output_root(resolve_against(opts.base_dir, output));
    }
    if let Some(packages) = opts.packages {
        builder = builder.packages(packages);
    }
    if let Some(scan_dir) = opts.scan_dir {
        builder = builder.scan_dir(scan_dir);
    }
    if let Some(clash) = opts.clash {
        builder = builder.clash_strategy(clash);
    }

    let config = builder.build().wrap_err("invalid run configuration")?;

    let mode = if opts.dry_run {
        RunMode::Preview
    } else {
        RunMode::Write
    };
    Engine::run(&config, &DeclarationScanner::new(), generators, mode)
}

fn resolve_against(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
