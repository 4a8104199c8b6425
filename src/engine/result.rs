//! Execution result types

use std::path::PathBuf;
use std::time::Duration;

/// Result of running one step to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: usize,
    /// Exit code, with signals mapped to `128 + signal` on Unix
    pub exit_code: i32,
    pub elapsed: Duration,
}

impl StepOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Existence and size of an expected output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStatus {
    pub label: String,
    pub path: PathBuf,
    /// Size in bytes; `None` when the file is missing
    pub size: Option<u64>,
}

impl OutputStatus {
    pub fn exists(&self) -> bool {
        self.size.is_some()
    }
}

/// Result of a pipeline run in which every step succeeded
#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
    pub outputs: Vec<OutputStatus>,
    pub stages: Vec<String>,
}

impl RunReport {
    pub fn total_elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }

    pub fn missing_outputs(&self) -> Vec<&OutputStatus> {
        self.outputs.iter().filter(|o| !o.exists()).collect()
    }
}
