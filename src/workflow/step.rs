//! Step definitions
//!
//! A step is one external program in the pipeline. Steps are listed in
//! execution order; their sequence number is their 1-based position.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single pipeline step as written in `pipeline.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    /// Human-readable description shown in the step banner
    pub description: String,

    /// Executable (or script) path, relative to the pipeline base directory
    pub run: PathBuf,

    /// Program the script is handed to, e.g. `python3` or `sh`
    #[serde(default)]
    pub interpreter: Option<String>,

    /// Extra arguments passed after the script
    #[serde(default)]
    pub args: Vec<String>,

    /// Timeout for this step in seconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

impl StepSpec {
    pub fn new(description: impl Into<String>, run: impl Into<PathBuf>) -> Self {
        Self {
            description: description.into(),
            run: run.into(),
            interpreter: None,
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }
}

/// A step bound to its position and resolved against the base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based sequence number
    pub number: usize,
    pub description: String,
    /// Absolute path of the step's executable or script
    pub reference: PathBuf,
    pub interpreter: Option<String>,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Step {
    /// Bind an ordered list of step specs to sequence numbers.
    ///
    /// `default_timeout` applies to steps that don't set their own.
    pub fn sequence(
        specs: &[StepSpec],
        base_dir: &Path,
        default_timeout: Option<Duration>,
    ) -> Vec<Step> {
        specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Step {
                number: i + 1,
                description: spec.description.clone(),
                reference: base_dir.join(&spec.run),
                interpreter: spec.interpreter.clone(),
                args: spec.args.clone(),
                timeout: spec.timeout.map(Duration::from_secs).or(default_timeout),
            })
            .collect()
    }

    /// Banner label, e.g. `STEP 2: Summarizer`
    pub fn label(&self) -> String {
        format!("STEP {}: {}", self.number, self.description)
    }
}
