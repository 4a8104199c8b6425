//! Pipeline configuration
//!
//! Configuration for the workflow orchestrator, loaded from `pipeline.yaml`:
//!
//! ```yaml
//! name: data-quality-workflow
//! timeout: 600
//!
//! requirements:
//!   packages:
//!     - name: pandas
//!       check: ["python3", "-c", "import pandas"]
//!     - name: jq
//!   install: ["python3", "-m", "pip", "install"]
//!
//! inputs:
//!   - label: Spec file
//!     path: specs/data_quality_spec.json
//!
//! steps:
//!   - description: ETL Pipeline - Apply quality rules from spec
//!     run: etl_pipeline.py
//!     interpreter: python3
//!
//! outputs:
//!   - label: Quality report
//!     path: data/quality_report.json
//!
//! stages:
//!   - Spec loaded (data_quality_spec.json)
//! ```
//!
//! Every section is optional. When no configuration file exists at all the
//! orchestrator falls back to [`PipelineConfig::reference`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::LoadError;
use super::step::StepSpec;

/// Default location of the quality report, relative to the base directory
pub const DEFAULT_REPORT_PATH: &str = "data/quality_report.json";

/// Something the pipeline needs available before any step runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirement {
    /// Requirement name; also the executable looked up on PATH when no
    /// `check` command is given, and the argument handed to the installer
    pub name: String,

    /// Command whose zero exit status means the requirement is available
    #[serde(default)]
    pub check: Option<Vec<String>>,
}

impl Requirement {
    pub fn executable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check: None,
        }
    }

    pub fn checked_by<I, S>(name: impl Into<String>, check: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            check: Some(check.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Requirements {
    #[serde(default)]
    pub packages: Vec<Requirement>,

    /// Installer command; missing requirement names are appended to it.
    /// Without one, unresolved requirements fail the run.
    #[serde(default)]
    pub install: Option<Vec<String>>,
}

impl Requirements {
    /// Configured installer command; an empty list counts as none
    pub fn installer(&self) -> Option<&[String]> {
        self.install.as_deref().filter(|c| !c.is_empty())
    }
}

/// A labelled file the pipeline consumes or produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artifact {
    pub label: String,
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }

    /// File name for display, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub name: String,

    /// Default step timeout in seconds; steps without one wait indefinitely
    pub timeout: Option<u64>,

    pub requirements: Requirements,

    /// Files that must exist before any step runs
    pub inputs: Vec<Artifact>,

    /// Steps in execution order
    pub steps: Vec<StepSpec>,

    /// Files reported (never enforced) after a successful run
    pub outputs: Vec<Artifact>,

    /// Logical stages listed in the closing summary
    pub stages: Vec<String>,
}

fn default_name() -> String {
    "data-quality-workflow".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            timeout: None,
            requirements: Requirements::default(),
            inputs: Vec::new(),
            steps: Vec::new(),
            outputs: Vec::new(),
            stages: Vec::new(),
        }
    }
}

/// Summarizer binary installed next to the running executable, falling back
/// to `bin/dq-summary` under the base directory
fn summarizer_path() -> PathBuf {
    locate_summarizer(std::env::current_exe().ok().as_deref())
}

fn locate_summarizer(current_exe: Option<&Path>) -> PathBuf {
    let file_name = format!("dq-summary{}", std::env::consts::EXE_SUFFIX);
    current_exe
        .and_then(Path::parent)
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| Path::new("bin").join(file_name))
}

impl PipelineConfig {
    /// Built-in workflow: a rule spec and raw sales data go through the ETL
    /// step, then the summarizer renders the quality report.
    pub fn reference() -> Self {
        Self {
            name: default_name(),
            timeout: None,
            requirements: Requirements {
                packages: vec![
                    Requirement::checked_by("pandas", ["python3", "-c", "import pandas"]),
                    Requirement::checked_by("numpy", ["python3", "-c", "import numpy"]),
                ],
                install: Some(vec![
                    "python3".to_string(),
                    "-m".to_string(),
                    "pip".to_string(),
                    "install".to_string(),
                ]),
            },
            inputs: vec![
                Artifact::new("Spec file", "specs/data_quality_spec.json"),
                Artifact::new("Data file", "data/raw_sales_data.csv"),
            ],
            steps: vec![
                StepSpec::new(
                    "ETL Pipeline - Apply quality rules from spec",
                    "etl_pipeline.py",
                )
                .interpreter("python3"),
                StepSpec::new("Summarizer - Generate anomaly report", summarizer_path()),
            ],
            outputs: vec![
                Artifact::new("Cleaned data", "data/cleaned_sales_data.csv"),
                Artifact::new("Flagged rows", "data/flagged_rows.csv"),
                Artifact::new("Quality report", DEFAULT_REPORT_PATH),
            ],
            stages: vec![
                "Rule spec loaded        (data_quality_spec.json)".to_string(),
                "ETL pipeline executed   (etl_pipeline.py)".to_string(),
                "Summary generated       (dq-summary)".to_string(),
            ],
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
            file: path.display().to_string(),
            error: e,
        })
    }

    /// Stage names for the closing summary; step descriptions when no
    /// stages are configured
    pub fn stage_names(&self) -> Vec<String> {
        if self.stages.is_empty() {
            self.steps.iter().map(|s| s.description.clone()).collect()
        } else {
            self.stages.clone()
        }
    }
}

/// A loaded configuration together with the directory its relative paths
/// resolve against
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub config: PipelineConfig,
    /// Absolute base directory; also the working directory of every step
    pub base_dir: PathBuf,
    /// Configuration file the pipeline came from, if any
    pub source: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
            source: None,
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}
