//! # dq-workflow
//!
//! Orchestration and reporting layer for a data-quality pipeline.
//!
//! ## Features
//!
//! - **Fail-fast step runner** - External steps run one after another as
//!   child processes; the first failure ends the run with its own exit code
//! - **Pre-flight checks** - Requirements, input files and step references
//!   are verified before anything runs, with every problem listed at once
//! - **Report rendering** - The quality report written by the rule
//!   evaluation step becomes a fixed-layout operator summary with
//!   rule-specific recommendations
//!
//! ## Quick Start - Run a pipeline
//!
//! ```rust,no_run
//! use dq_workflow::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cwd = std::env::current_dir()?;
//!     let pipeline = PipelineLoader::load(None, &cwd)?;
//!
//!     let code = Orchestrator::new(pipeline).run().await;
//!     std::process::exit(code);
//! }
//! ```
//!
//! ## Quick Start - Render a report
//!
//! ```rust,no_run
//! fn main() -> Result<(), dq_workflow::ReportError> {
//!     let text = dq_workflow::render_file("data/quality_report.json")?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod logging;
pub mod report;
pub mod workflow;

// Re-export main types
pub use engine::{
    Orchestrator, OrchestratorError, OutputStatus, RunReport, StepOutcome, EXIT_INTERRUPTED,
    EXIT_PRECONDITION, EXIT_TIMEOUT,
};
pub use report::{render, render_file, Issue, QualityReport, ReportError, RuleDiagnostic, Summary};
pub use workflow::{
    Artifact, LoadError, Pipeline, PipelineConfig, PipelineLoader, Requirement, Requirements,
    Step, StepSpec,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{Orchestrator, OrchestratorError, RunReport};
    pub use crate::report::{render, render_file, QualityReport, ReportError};
    pub use crate::workflow::{
        LoadError, Pipeline, PipelineConfig, PipelineLoader, Step, StepSpec, DEFAULT_CONFIG_FILE,
        DEFAULT_REPORT_PATH,
    };
}
