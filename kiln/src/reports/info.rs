//! Info command report data structures.

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from the resolved project model.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    /// Output root for generated sources.
    pub output_root: String,
    /// Package-name glob.
    pub packages: String,
    /// Directory ant-glob.
    pub scan_dir: String,
    /// Match expression over trigger annotation names.
    pub annotation_matches: String,
    /// Match expression over generator identifiers.
    pub generator_matches: String,
    pub clash_strategy: String,
    pub fail_on_parse_error: bool,
    pub skip: bool,
    pub source_version: Option<String>,
    pub target_version: Option<String>,
    /// Every root available for symbol resolution, with classification.
    pub resolution_roots: Vec<RootEntry>,
    /// The narrower set that will be searched for triggers.
    pub scan_roots: Vec<String>,
    pub builtin_bindings: Vec<Binding>,
    pub custom_bindings: Vec<Binding>,
}

/// One classified resolution root.
#[derive(Debug, Serialize)]
pub struct RootEntry {
    pub path: String,
    pub origin: String,
    pub content: String,
    pub directory: bool,
}

/// One annotation-to-generator binding.
#[derive(Debug, Serialize)]
pub struct Binding {
    pub annotation: String,
    pub generator: String,
}

impl Report for InfoReport {
    fn render(&self, out: &mut dyn Output) {
        out.section("Options");
        out.key_value("  output root", &self.output_root);
        out.key_value("  packages", &self.packages);
        out.key_value("  scan dir", &self.scan_dir);
        out.key_value("  annotation matches", &self.annotation_matches);
        out.key_value("  generator matches", &self.generator_matches);
        out.key_value("  clash strategy", &self.clash_strategy);
        out.key_value(
            "  fail on parse error",
            &self.fail_on_parse_error.to_string(),
        );
        out.key_value("  skip", &self.skip.to_string());
        if let Some(version) = &self.source_version {
            out.key_value("  source version", version);
        }
        if let Some(version) = &self.target_version {
            out.key_value("  target version", version);
        }
        out.newline();

        out.section(&format!("Resolution roots ({})", self.resolution_roots.len()));
        for root in &self.resolution_roots {
            let kind = if root.directory { "dir" } else { "file" };
            out.list_item(&format!(
                "{} [{}, {}, {}]",
                root.path, root.origin, root.content, kind
            ));
        }
        out.newline();

        out.section(&format!("Scan roots ({})", self.scan_roots.len()));
        for root in &self.scan_roots {
            out.list_item(root);
        }
        out.newline();

        out.section("Built-in bindings");
        for binding in &self.builtin_bindings {
            out.list_item(&format!("{} -> {}", binding.annotation, binding.generator));
        }
        if !self.custom_bindings.is_empty() {
            out.newline();
            out.section("Custom bindings");
            for binding in &self.custom_bindings {
                out.added_item(&format!("{} -> {}", binding.annotation, binding.generator));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::output::BufferOutput;
    use super::*;

    #[test]
    fn test_render_info_report() {
        let report = InfoReport {
            output_root: "/work/app/src/generated/java".to_string(),
            packages: "com.acme.*".to_string(),
            scan_dir: "**".to_string(),
            annotation_matches: "*".to_string(),
            generator_matches: "*".to_string(),
            clash_strategy: "skip".to_string(),
            fail_on_parse_error: true,
            skip: false,
            source_version: Some("17".to_string()),
            target_version: None,
            resolution_roots: vec![
                RootEntry {
                    path: "/work/app/src/main/java".to_string(),
                    origin: "main".to_string(),
                    content: "source".to_string(),
                    directory: true,
                },
                RootEntry {
                    path: "/m2/acme-util.jar".to_string(),
                    origin: "dependency".to_string(),
                    content: "binary".to_string(),
                    directory: false,
                },
            ],
            scan_roots: vec!["/work/app/src/main/java".to_string()],
            builtin_bindings: vec![Binding {
                annotation: "dev.kiln.generate.GenerateBean".to_string(),
                generator: "bean".to_string(),
            }],
            custom_bindings: vec![Binding {
                annotation: "com.acme.GenerateWidget".to_string(),
                generator: "widget".to_string(),
            }],
        };

        let mut out = BufferOutput::new();
        report.render(&mut out);
        insta::assert_snapshot!(out.into_string(), @r"
        Options:
          output root: /work/app/src/generated/java
          packages: com.acme.*
          scan dir: **
          annotation matches: *
          generator matches: *
          clash strategy: skip
          fail on parse error: true
          skip: false
          source version: 17

        Resolution roots (2):
          - /work/app/src/main/java [main, source, dir]
          - /m2/acme-util.jar [dependency, binary, file]

        Scan roots (1):
          - /work/app/src/main/java

        Built-in bindings:
          - dev.kiln.generate.GenerateBean -> bean

        Custom bindings:
          + com.acme.GenerateWidget -> widget
        ");
    }
}
