//! Quality report data model
//!
//! Mirrors the JSON written by the rule evaluation step. Field names are the
//! wire contract and must not be renamed.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::error::ReportError;

/// The quality report produced by the rule evaluation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub pipeline_name: String,
    pub run_timestamp: String,
    pub spec_generated_by: String,
    pub summary: Summary,
    pub issues: Vec<Issue>,
    /// Human label -> path, in the order the report lists them
    pub output_files: IndexMap<String, String>,
}

/// Row counts for one evaluation run.
///
/// `clean_rows + flagged_rows == rows_after_dedup` is expected but not
/// checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_input_rows: u64,
    pub rows_after_dedup: u64,
    pub clean_rows: u64,
    pub flagged_rows: u64,
    /// Kept as written so `85.0` renders as `85.0` and `85` as `85`
    pub pass_rate_pct: Number,
    pub total_issues_found: u64,
}

/// One rule violation found by the evaluation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub rule_id: String,
    pub rule_name: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_values: Option<Vec<Value>>,
}

impl Issue {
    /// The first `limit` sample values joined with `, `, or `None` when the
    /// issue carries no samples at all
    pub fn samples(&self, limit: usize) -> Option<String> {
        self.sample_values.as_ref().map(|values| {
            values
                .iter()
                .take(limit)
                .map(display_value)
                .collect::<Vec<_>>()
                .join(", ")
        })
    }
}

/// Strings render bare, null and booleans as `None`/`True`/`False` (the
/// spelling report producers print them with), everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

impl QualityReport {
    pub fn from_json(content: &str) -> Result<Self, ReportError> {
        serde_json::from_str(content).map_err(|e| ReportError::Malformed {
            path: None,
            source: e,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ReportError::Malformed {
            path: Some(path.to_path_buf()),
            source: e,
        })
    }
}
