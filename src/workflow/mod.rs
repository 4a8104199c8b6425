//! Pipeline definitions
//!
//! This module contains the types describing what the orchestrator runs:
//! - `step` - StepSpec (as configured) and Step (numbered and resolved)
//! - `pipeline_config` - PipelineConfig, requirements, input/output artifacts
//! - `loader` - Locate and load `pipeline.yaml`

pub mod loader;
pub mod pipeline_config;
pub mod step;

pub use loader::{LoadError, PipelineLoader, DEFAULT_CONFIG_FILE};
pub use pipeline_config::{
    Artifact, Pipeline, PipelineConfig, Requirement, Requirements, DEFAULT_REPORT_PATH,
};
pub use step::{Step, StepSpec};
