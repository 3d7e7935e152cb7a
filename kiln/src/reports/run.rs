//! Run command report rendering.
//!
//! The report data itself lives in the engine ([`RunReport`] is what
//! `Engine::run` returns); this module only teaches it to render.

use kiln_engine::{RunReport, Severity};

use super::output::{Output, Report};

impl Report for RunReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            let message = match &diag.location {
                Some(location) => format!("{} (at {location})", diag.message),
                None => diag.message.clone(),
            };
            match diag.severity {
                Severity::Error => out.error(&message),
                Severity::Warning => out.warning(&message),
                Severity::Info => {}
            }
        }

        if self.skipped_run {
            out.preformatted("Generation skipped by configuration");
            return;
        }

        for artifact in &self.previewed {
            out.divider(&artifact.path);
            out.preformatted(&artifact.content);
        }
        if !self.previewed.is_empty() {
            out.divider("Summary");
            out.preformatted(&format!(
                "{} artifacts would be generated",
                self.previewed.len()
            ));
        }

        if !self.written.is_empty() {
            out.section("Generated");
            for path in &self.written {
                out.added_item(path);
            }
        }
        if !self.skipped.is_empty() {
            out.section("Left untouched");
            for path in &self.skipped {
                out.list_item(path);
            }
        }
        if !self.skipped_triggers.is_empty() {
            out.section("Skipped triggers");
            for note in &self.skipped_triggers {
                out.list_item(note);
            }
        }
        if !self.parse_failures.is_empty() {
            out.section("Parse failures");
            for failure in &self.parse_failures {
                out.list_item(failure);
            }
        }

        out.newline();
        out.key_value("Units scanned", &self.units_scanned.to_string());
        out.key_value("Triggers fired", &self.triggers_fired.to_string());
        out.key_value("Status", &self.status.to_string());
    }
}

#[cfg(test)]
mod tests {
    use kiln_engine::{Diagnostic, PreviewArtifact, RunStatus};

    use super::super::output::BufferOutput;
    use super::*;

    fn empty_report(status: RunStatus) -> RunReport {
        RunReport {
            status,
            skipped_run: false,
            units_scanned: 0,
            triggers_fired: 0,
            written: Vec::new(),
            skipped: Vec::new(),
            previewed: Vec::new(),
            skipped_triggers: Vec::new(),
            parse_failures: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_render_written_and_skipped() {
        let mut report = empty_report(RunStatus::Success);
        report.units_scanned = 2;
        report.triggers_fired = 2;
        report.written = vec!["com/acme/WidgetBean.java".to_string()];
        report.skipped = vec!["com/acme/GadgetBean.java".to_string()];

        let mut out = BufferOutput::new();
        report.render(&mut out);
        insta::assert_snapshot!(out.into_string(), @r"
        Generated:
          + com/acme/WidgetBean.java
        Left untouched:
          - com/acme/GadgetBean.java

        Units scanned: 2
        Triggers fired: 2
        Status: success
        ");
    }

    #[test]
    fn test_render_skipped_run_says_nothing_else() {
        let report = RunReport::skipped_run();

        let mut out = BufferOutput::new();
        report.render(&mut out);
        insta::assert_snapshot!(out.into_string(), @"Generation skipped by configuration");
    }

    #[test]
    fn test_render_preview_artifacts() {
        let mut report = empty_report(RunStatus::Success);
        report.units_scanned = 1;
        report.triggers_fired = 1;
        report.previewed = vec![PreviewArtifact {
            path: "com/acme/WidgetBean.java".to_string(),
            content: "// generated\n".to_string(),
        }];

        let mut out = BufferOutput::new();
        report.render(&mut out);
        insta::assert_snapshot!(out.into_string(), @r"
        ── com/acme/WidgetBean.java ──
        // generated

        ── Summary ──
        1 artifacts would be generated

        Units scanned: 1
        Triggers fired: 1
        Status: success
        ");
    }

    #[test]
    fn test_render_fatal_with_error_diagnostic() {
        let mut report = empty_report(RunStatus::Fatal);
        report.units_scanned = 1;
        report.diagnostics = vec![
            Diagnostic::error("parse", "no package declaration").at("src/Broken.java"),
        ];

        let mut out = BufferOutput::new();
        report.render(&mut out);
        insta::assert_snapshot!(out.into_string(), @r"
        error: no package declaration (at src/Broken.java)

        Units scanned: 1
        Triggers fired: 0
        Status: fatal
        ");
    }
}
