//! Pipeline execution engine module
//!
//! This module contains:
//! - `orchestrator` - The sequential, fail-fast pipeline runner
//! - `preflight` - Requirement, input and step-reference checks
//! - `step_runner` - Child process execution with optional timeout
//! - `error` - Orchestrator error types and exit status mapping
//! - `result` - Step outcome and run report types

pub mod error;
pub mod orchestrator;
pub mod preflight;
pub mod result;
pub mod step_runner;

pub use error::{OrchestratorError, EXIT_INTERRUPTED, EXIT_PRECONDITION, EXIT_TIMEOUT};
pub use orchestrator::{banner, Orchestrator};
pub use result::{OutputStatus, RunReport, StepOutcome};
