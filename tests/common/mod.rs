#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

pub fn write_pipeline(dir: &Path, content: &str) -> PathBuf {
    write_file(dir, "pipeline.yaml", content)
}

/// Shell step that leaves `ran-<name>` behind and exits with `code`
pub fn marker_script(name: &str, code: i32) -> String {
    format!("echo \"running {name}\"\ntouch ran-{name}\nexit {code}\n")
}

/// Pipeline YAML with one `sh` step per `(name, exit code)` pair
pub fn sh_pipeline(steps: &[(&str, i32)]) -> String {
    let mut yaml = String::from("name: test-pipeline\nsteps:\n");
    for (name, _) in steps {
        yaml.push_str(&format!(
            "  - description: {name}\n    run: {name}.sh\n    interpreter: sh\n"
        ));
    }
    yaml
}

/// Write the scripts and pipeline for `sh_pipeline`
pub fn setup_sh_pipeline(dir: &Path, steps: &[(&str, i32)]) {
    for (name, code) in steps {
        write_file(dir, &format!("{name}.sh"), &marker_script(name, *code));
    }
    write_pipeline(dir, &sh_pipeline(steps));
}

pub fn ran(dir: &Path, name: &str) -> bool {
    dir.join(format!("ran-{name}")).exists()
}

pub fn sample_report() -> Value {
    json!({
        "pipeline_name": "sales-etl",
        "run_timestamp": "2024-05-01T10:00:00",
        "spec_generated_by": "rule-author",
        "summary": {
            "total_input_rows": 1200,
            "rows_after_dedup": 1150,
            "clean_rows": 1000,
            "flagged_rows": 150,
            "pass_rate_pct": 86.96,
            "total_issues_found": 9
        },
        "issues": [
            {
                "rule_id": "R001",
                "rule_name": "No duplicate orders",
                "detail": "50 exact duplicates removed"
            },
            {
                "rule_id": "R003",
                "rule_name": "Valid email",
                "detail": "12 rows with invalid email",
                "sample_values": ["bob@", "x@@y.com", "none", "extra"]
            },
            {
                "rule_id": "R007",
                "rule_name": "Region code",
                "detail": "3 unknown region codes"
            }
        ],
        "output_files": {
            "Cleaned data": "data/cleaned_sales_data.csv",
            "Flagged rows": "data/flagged_rows.csv",
            "Quality report": "data/quality_report.json"
        }
    })
}

pub fn write_report(dir: &Path, report: &Value) -> PathBuf {
    write_file(
        dir,
        "data/quality_report.json",
        &serde_json::to_string_pretty(report).expect("Failed to serialize report"),
    )
}
