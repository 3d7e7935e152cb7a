//! Info operation - render the resolved project model.

use std::path::Path;

use eyre::{Context, Result};
use kiln_core::{ProjectModel, RootCatalog};
use kiln_engine::{BUILTIN_BINDINGS, RunConfigBuilder};
use kiln_manifest::Schema;

use crate::reports::{Binding, InfoReport, RootEntry};

/// Execute the info operation.
pub fn info(schema: &Schema, model: &ProjectModel, base_dir: &Path) -> Result<InfoReport> {
    let roots = RootCatalog::resolve(model);
    let scan_roots = RootCatalog::resolve_scan_roots(model);

    let config = RunConfigBuilder::from_manifest(schema, base_dir)
        .roots(roots)
        .scan_roots(scan_roots)
        .build()
        .wrap_err("invalid run configuration")?;

    let resolution_roots = config
        .resolution_roots()
        .iter()
        .map(|root| RootEntry {
            path: root.location().display().to_string(),
            origin: root.origin().to_string(),
            content: root.content().to_string(),
            directory: root.is_directory(),
        })
        .collect();
    let scan_roots = config
        .scan_roots()
        .iter()
        .map(|root| root.location().display().to_string())
        .collect();

    let builtin_bindings = BUILTIN_BINDINGS
        .iter()
        .map(|(annotation, generator)| Binding {
            annotation: annotation.to_string(),
            generator: generator.to_string(),
        })
        .collect();
    let custom_bindings = config
        .bindings()
        .overrides()
        .map(|(annotation, generator)| Binding {
            annotation: annotation.to_string(),
            generator: generator.to_string(),
        })
        .collect();

    Ok(InfoReport {
        output_root: config.output_root().display().to_string(),
        packages: config.packages().to_string(),
        scan_dir: config.scan_dir().to_string(),
        annotation_matches: config.annotation_matcher().to_string(),
        generator_matches: config.generator_matcher().to_string(),
        clash_strategy: config.clash_strategy().to_string(),
        fail_on_parse_error: config.fail_on_parse_error(),
        skip: config.skip(),
        source_version: config.options().source_version.clone(),
        target_version: config.options().target_version.clone(),
        resolution_roots,
        scan_roots,
        builtin_bindings,
        custom_bindings,
    })
}

#[cfg(test)]
mod tests {
    use kiln_engine::testing::TestProject;

    use super::*;

    #[test]
    fn test_info_collects_roots_and_bindings() {
        let project = TestProject::new();
        project.model(&["src/main/java", "src/test/java"]);
        let schema = kiln_manifest::parse_str(
            "[generate.generators]\n\"com.acme.GenerateWidget\" = \"widget\"\n",
        )
        .unwrap();
        let model = schema.project_model(project.base_dir()).unwrap();

        let report = info(&schema, &model, project.base_dir()).unwrap();

        assert_eq!(report.resolution_roots.len(), 2);
        assert_eq!(report.scan_roots.len(), 2);
        assert_eq!(report.builtin_bindings.len(), BUILTIN_BINDINGS.len());
        assert_eq!(report.custom_bindings.len(), 1);
        assert_eq!(report.custom_bindings[0].generator, "widget");
        assert_eq!(report.clash_strategy, "skip");
        assert!(report.fail_on_parse_error);
    }
}
