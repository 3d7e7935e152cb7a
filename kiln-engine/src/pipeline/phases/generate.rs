//! Generation: fire matched triggers and mediate every write.

use eyre::Result;
use kiln_core::{WriteOutcome, write_artifact};

use super::super::{Phase, PreviewArtifact, RunContext, RunMode};
use crate::generator::GenerationError;

/// For each unit and trigger annotation: apply the annotation matcher,
/// resolve the binding, apply the generator matcher, then run the linked
/// implementation and write its artifacts under the clash policy.
pub struct GeneratePhase;

impl Phase for GeneratePhase {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn description(&self) -> &'static str {
        "run bound generators over matched triggers"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let units = ctx.units.clone();

        for unit in &units {
            for annotation in &unit.annotations {
                if !config.annotation_matcher().matches(annotation) {
                    continue;
                }

                let Some(generator_id) = config.bindings().resolve(annotation) else {
                    ctx.skipped_triggers.push(format!(
                        "{annotation} at {}: no generator bound",
                        unit.path.display()
                    ));
                    continue;
                };

                if !config.generator_matcher().matches(generator_id) {
                    ctx.skipped_triggers.push(format!(
                        "{annotation}: generator '{generator_id}' excluded by expression"
                    ));
                    continue;
                }

                let Some(generator) = ctx.generators.get(generator_id) else {
                    ctx.skipped_triggers.push(format!(
                        "{annotation}: generator '{generator_id}' not linked"
                    ));
                    ctx.add_warning(
                        self.name(),
                        format!(
                            "no generator '{generator_id}' is linked into this toolchain, \
                             skipping '{annotation}'"
                        ),
                    );
                    continue;
                };

                let artifacts = match generator.generate(unit, annotation) {
                    Ok(artifacts) => artifacts,
                    Err(e) => {
                        let failure = GenerationError {
                            generator: generator_id.to_string(),
                            annotation: annotation.clone(),
                            location: unit.path.clone(),
                            cause: format!("{e:#}"),
                        };
                        ctx.abort(self.name(), failure.to_string());
                        return Ok(());
                    }
                };
                let strategy = generator.clash_strategy().unwrap_or(config.clash_strategy());
                ctx.triggers_fired += 1;

                for artifact in artifacts {
                    let relative = artifact.path.display().to_string();
                    match ctx.mode {
                        RunMode::Preview => {
                            ctx.previewed.push(PreviewArtifact {
                                path: relative,
                                content: artifact.content,
                            });
                        }
                        RunMode::Write => {
                            let target = config.output_root().join(&artifact.path);
                            match write_artifact(&target, &artifact.content, strategy) {
                                Ok(WriteOutcome::Written) => ctx.written.push(relative),
                                Ok(WriteOutcome::Skipped) => ctx.skipped.push(relative),
                                Err(e) => {
                                    ctx.abort(self.name(), e.to_string());
                                    return Ok(());
                                }
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
