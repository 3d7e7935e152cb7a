//! Check operation - fail-fast validation without generation.

use kiln_core::RootCatalog;
use kiln_engine::RunConfigBuilder;
use kiln_manifest::KilnToml;
use std::path::Path;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The manifest itself was validated when it was opened; this goes the
/// rest of the way a run would go before touching any source file: load
/// the project model, resolve the root sets, and assemble the run
/// configuration, collecting everything a run would warn or fail on.
pub fn check(manifest: &KilnToml, base_dir: &Path) -> CheckReport {
    let schema = manifest.schema();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut resolution_roots = 0;
    let mut scan_roots = 0;

    for dir in schema
        .project
        .source_dirs
        .iter()
        .chain(&schema.project.test_source_dirs)
    {
        let resolved = if dir.is_absolute() {
            dir.clone()
        } else {
            base_dir.join(dir)
        };
        if !resolved.is_dir() {
            warnings.push(format!("source dir '{}' does not exist", dir.display()));
        }
    }

    match schema.project_model(base_dir) {
        Err(e) => errors.push(e.to_string()),
        Ok(model) => {
            resolution_roots = RootCatalog::resolve(&model).len();
            scan_roots = RootCatalog::resolve_scan_roots(&model).len();

            let builder = RunConfigBuilder::from_manifest(schema, base_dir)
                .roots(RootCatalog::resolve(&model))
                .scan_roots(RootCatalog::resolve_scan_roots(&model));
            match builder.build() {
                Err(e) => errors.push(e.to_string()),
                Ok(config) => {
                    warnings.extend(config.warnings().iter().map(|d| d.message.clone()));
                }
            }
        }
    }

    CheckReport {
        config_path: manifest.path().to_path_buf(),
        errors,
        warnings,
        resolution_roots,
        scan_roots,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use kiln_engine::testing::TestProject;

    use super::*;

    fn open_manifest(project: &TestProject, content: &str) -> KilnToml {
        let path = project.base_dir().join("kiln.toml");
        fs::write(&path, content).unwrap();
        KilnToml::open(&path).unwrap()
    }

    #[test]
    fn test_check_valid_project() {
        let project = TestProject::new();
        project.model(&["src/main/java", "src/test/java"]);
        let manifest = open_manifest(&project, "");

        let report = check(&manifest, project.base_dir());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.resolution_roots, 2);
        assert_eq!(report.scan_roots, 2);
    }

    #[test]
    fn test_check_warns_on_missing_source_dir() {
        let project = TestProject::new();
        let manifest = open_manifest(&project, "");

        let report = check(&manifest, project.base_dir());
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.scan_roots, 0);
    }

    #[test]
    fn test_check_surfaces_binding_override_warning() {
        let project = TestProject::new();
        project.model(&["src/main/java", "src/test/java"]);
        let manifest = open_manifest(
            &project,
            "[generate.generators]\n\"dev.kiln.generate.GenerateBean\" = \"custom\"\n",
        );

        let report = check(&manifest, project.base_dir());
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("built-in")));
    }

    #[test]
    fn test_check_reports_unresolvable_classpath() {
        let project = TestProject::new();
        project.model(&["src/main/java", "src/test/java"]);
        let manifest = open_manifest(&project, "[project]\nclasspath_file = \"cp.txt\"\n");

        let report = check(&manifest, project.base_dir());
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("classpath"));
    }
}
