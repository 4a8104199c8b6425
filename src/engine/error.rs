//! Orchestrator error types

use std::path::PathBuf;

use crate::workflow::LoadError;

/// Exit status for pre-condition and configuration failures
pub const EXIT_PRECONDITION: i32 = 2;

/// Exit status for a step killed after exceeding its timeout
pub const EXIT_TIMEOUT: i32 = 124;

/// Exit status for a run stopped by Ctrl-C while a timed step was running
pub const EXIT_INTERRUPTED: i32 = 130;

/// Errors that end a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("Config error: {0}")]
    Load(#[from] LoadError),

    #[error("Missing requirements: {}", .0.join(", "))]
    MissingRequirements(Vec<String>),

    #[error("Installer {program} exited with code {code}")]
    InstallFailed { program: String, code: i32 },

    #[error("Required input files not found: {0:?}")]
    MissingInputs(Vec<PathBuf>),

    #[error("Step executable not found: {0}")]
    MissingExecutable(PathBuf),

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Step {step} exited with code {code}")]
    StepFailed { step: usize, code: i32 },

    #[error("Step {step} timed out after {secs}s")]
    StepTimedOut { step: usize, secs: u64 },

    #[error("Step {step} interrupted")]
    Interrupted { step: usize },
}

impl OrchestratorError {
    /// Process exit status this error ends the run with.
    ///
    /// Step and installer failures forward their own code unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            OrchestratorError::StepFailed { code, .. } => *code,
            OrchestratorError::InstallFailed { code, .. } => *code,
            OrchestratorError::StepTimedOut { .. } => EXIT_TIMEOUT,
            OrchestratorError::Interrupted { .. } => EXIT_INTERRUPTED,
            OrchestratorError::Load(_)
            | OrchestratorError::MissingRequirements(_)
            | OrchestratorError::MissingInputs(_)
            | OrchestratorError::MissingExecutable(_)
            | OrchestratorError::Spawn { .. } => EXIT_PRECONDITION,
        }
    }

    /// True for failures detected before the failing step started running
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            OrchestratorError::Load(_)
                | OrchestratorError::MissingRequirements(_)
                | OrchestratorError::MissingInputs(_)
                | OrchestratorError::MissingExecutable(_)
                | OrchestratorError::Spawn { .. }
        )
    }
}
