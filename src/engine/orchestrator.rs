//! Pipeline Orchestrator - Runs steps in order and stops at the first failure
//!
//! A run goes through three phases:
//! 1. Pre-flight: requirements resolve (or get installed), inputs exist
//! 2. Steps: each runs as a child process, strictly one after another
//! 3. Final summary: expected outputs and completed stages are listed
//!
//! Operator-facing progress goes to stdout with `println!` so that it
//! interleaves with the children's inherited output in the order written.
//! Diagnostics go through `tracing`.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::engine::error::OrchestratorError;
use crate::engine::preflight::{missing_inputs, unresolved_requirements};
use crate::engine::result::{OutputStatus, RunReport, StepOutcome};
use crate::engine::step_runner::{run_quiet, run_step};
use crate::workflow::{Pipeline, Step};

const BANNER_WIDTH: usize = 60;

/// Sequential, fail-fast pipeline runner
pub struct Orchestrator {
    pipeline: Pipeline,
    steps: Vec<Step>,
}

impl Orchestrator {
    pub fn new(pipeline: Pipeline) -> Self {
        let default_timeout = pipeline.config.timeout.map(Duration::from_secs);
        let steps = Step::sequence(&pipeline.config.steps, &pipeline.base_dir, default_timeout);
        Self { pipeline, steps }
    }

    /// Override the default step timeout; steps with their own keep it
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.pipeline.config.timeout = Some(secs);
        self.steps = Step::sequence(
            &self.pipeline.config.steps,
            &self.pipeline.base_dir,
            Some(Duration::from_secs(secs)),
        );
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run the pipeline and return the process exit status.
    ///
    /// `0` when every step succeeded, otherwise the status of the first
    /// failure (see [`OrchestratorError::exit_code`]).
    pub async fn run(&self) -> i32 {
        match self.execute().await {
            Ok(report) => {
                let missing = report.missing_outputs();
                if !missing.is_empty() {
                    warn!("{} expected output file(s) missing", missing.len());
                }
                0
            }
            Err(e) => {
                error!(error = %e, "Pipeline run failed");
                e.exit_code()
            }
        }
    }

    /// Run every phase, stopping at the first failure
    #[instrument(skip(self), fields(pipeline = %self.pipeline.config.name))]
    pub async fn execute(&self) -> Result<RunReport, OrchestratorError> {
        print_banner(&self.pipeline.config.name.to_uppercase());
        println!(
            "  Started:  {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        println!("  Base dir: {}", self.pipeline.base_dir.display());
        println!("  Steps:    {}\n", self.steps.len());

        self.ensure_requirements().await?;
        self.check_inputs()?;

        let outcomes = self.run_steps().await?;
        Ok(self.final_summary(outcomes))
    }

    /// Resolve requirements, installing any that are missing
    async fn ensure_requirements(&self) -> Result<(), OrchestratorError> {
        let requirements = &self.pipeline.config.requirements;
        if requirements.packages.is_empty() {
            return Ok(());
        }

        let missing = unresolved_requirements(&self.pipeline).await;
        if missing.is_empty() {
            println!("[SETUP] All dependencies are available.\n");
            return Ok(());
        }

        let Some(installer) = requirements.installer() else {
            println!("[ERROR] Missing requirements: {}", missing.join(", "));
            println!("\nInstall them, or set `requirements.install` in the pipeline config.");
            return Err(OrchestratorError::MissingRequirements(missing));
        };

        println!("[SETUP] Installing missing packages: {} ...", missing.join(", "));
        info!("Installing {:?} with {:?}", missing, installer);

        let mut argv = installer.to_vec();
        argv.extend(missing.iter().cloned());
        let code = match run_quiet(&argv, &self.pipeline.base_dir).await {
            Ok(code) => code,
            Err(e) => {
                println!("[ERROR] {}", e);
                return Err(e);
            }
        };
        if code != 0 {
            println!("[ERROR] Installer exited with code {}", code);
            return Err(OrchestratorError::InstallFailed {
                program: installer[0].clone(),
                code,
            });
        }

        println!("[SETUP] Packages installed successfully.\n");
        Ok(())
    }

    /// Verify every input exists, reporting all missing files at once
    fn check_inputs(&self) -> Result<(), OrchestratorError> {
        let missing = missing_inputs(&self.pipeline);
        if !missing.is_empty() {
            println!("[ERROR] Required input files not found:");
            for path in &missing {
                println!("  Missing: {}", path.display());
            }
            println!("\nPlease ensure the rule spec and raw data are in place.");
            return Err(OrchestratorError::MissingInputs(missing));
        }

        let inputs = &self.pipeline.config.inputs;
        for input in inputs {
            println!("[CHECK] {}:  {}  ... OK", input.label, input.file_name());
        }
        if !inputs.is_empty() {
            println!();
        }
        Ok(())
    }

    async fn run_steps(&self) -> Result<Vec<StepOutcome>, OrchestratorError> {
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            print_banner(&step.label());

            let outcome = match run_step(step, &self.pipeline.base_dir).await {
                Ok(outcome) => outcome,
                Err(OrchestratorError::MissingExecutable(path)) => {
                    println!("[ERROR] Step executable not found: {}", path.display());
                    return Err(OrchestratorError::MissingExecutable(path));
                }
                Err(e) => {
                    println!("\n[FAILED] {}", e);
                    return Err(e);
                }
            };

            if !outcome.success() {
                println!(
                    "\n[FAILED] Step {} exited with code {}",
                    step.number, outcome.exit_code
                );
                return Err(OrchestratorError::StepFailed {
                    step: step.number,
                    code: outcome.exit_code,
                });
            }

            println!(
                "\n[DONE] Step {} completed in {:.1}s",
                step.number,
                outcome.elapsed.as_secs_f64()
            );
            info!("Step {} succeeded in {:?}", step.number, outcome.elapsed);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// List outputs and completed stages. Never fails the run.
    fn final_summary(&self, steps: Vec<StepOutcome>) -> RunReport {
        print_banner("WORKFLOW COMPLETE");

        let outputs: Vec<OutputStatus> = self
            .pipeline
            .config
            .outputs
            .iter()
            .map(|artifact| {
                let path = self.pipeline.resolve(&artifact.path);
                OutputStatus {
                    label: artifact.label.clone(),
                    size: file_size(&path),
                    path,
                }
            })
            .collect();

        if !outputs.is_empty() {
            println!("  Output files generated:");
            for (artifact, status) in self.pipeline.config.outputs.iter().zip(&outputs) {
                match status.size {
                    Some(size) => println!(
                        "    [OK] {}: {} ({} bytes)",
                        status.label,
                        artifact.file_name(),
                        group_thousands(size)
                    ),
                    None => println!("    [MISSING] {}: {}", status.label, artifact.file_name()),
                }
            }
            println!();
        }

        let stages = self.pipeline.config.stage_names();
        println!("  Workflow steps completed:");
        for (i, stage) in stages.iter().enumerate() {
            println!("    {}. {}", i + 1, stage);
        }
        println!();

        let report = RunReport {
            steps,
            outputs,
            stages,
        };
        println!(
            "  All done! {} step(s) in {:.1}s.\n",
            report.steps.len(),
            report.total_elapsed().as_secs_f64()
        );
        report
    }
}

/// Section banner: a blank line, the text between two 60-column rules,
/// another blank line
pub fn banner(text: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\n  {text}\n{rule}\n")
}

fn print_banner(text: &str) {
    println!("{}", banner(text));
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len())
}

/// `1234567` -> `1,234,567`
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
