mod common;

use common::*;
use dq_workflow::report::render::{NO_ANOMALIES, NO_ISSUES};
use dq_workflow::{render_file, QualityReport, ReportError};
use serde_json::json;

#[test]
fn test_render_file_sections_in_order() {
    let dir = create_test_dir();
    let path = write_report(dir.path(), &sample_report());

    let text = render_file(&path).unwrap();

    let positions: Vec<usize> = [
        "DATA QUALITY SUMMARY REPORT",
        " OVERVIEW ",
        " ISSUES DETAIL ",
        " KEY ANOMALIES & RECOMMENDATIONS ",
        "  Output files:",
    ]
    .iter()
    .map(|marker| text.find(marker).unwrap_or_else(|| panic!("missing {marker}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_render_twice_identical() {
    let dir = create_test_dir();
    let path = write_report(dir.path(), &sample_report());

    let first = render_file(&path).unwrap();
    let second = render_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_render_does_not_touch_report_file() {
    let dir = create_test_dir();
    let path = write_report(dir.path(), &sample_report());
    let before = std::fs::read(&path).unwrap();

    render_file(&path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_empty_issues_markers() {
    let dir = create_test_dir();
    let mut report = sample_report();
    report["issues"] = json!([]);
    let path = write_report(dir.path(), &report);

    let text = render_file(&path).unwrap();

    assert!(text.contains(NO_ISSUES));
    assert!(text.contains(NO_ANOMALIES));
    assert!(!text.contains('⚠'));
    assert!(!text.contains("ISSUES DETAIL"));
}

#[test]
fn test_unmapped_rule_still_listed() {
    let dir = create_test_dir();
    let path = write_report(dir.path(), &sample_report());

    let text = render_file(&path).unwrap();

    assert!(text.contains("[R007] Region code"));
    assert!(text.contains("→ 3 unknown region codes"));
    assert_eq!(text.matches('⚠').count(), 2);
    assert!(text.contains("⚠ DUPLICATES: Exact duplicate orders found."));
    assert!(text.contains("⚠ INVALID EMAILS: 12 rows with invalid email."));
    assert!(!text.contains(NO_ANOMALIES));
}

#[test]
fn test_only_unmapped_rules_gives_no_anomalies_marker() {
    let dir = create_test_dir();
    let mut report = sample_report();
    report["issues"] = json!([
        {"rule_id": "R007", "rule_name": "Region code", "detail": "3 unknown"},
        {"rule_id": "X100", "rule_name": "Custom", "detail": "1 odd row"}
    ]);
    let path = write_report(dir.path(), &report);

    let text = render_file(&path).unwrap();

    assert!(text.contains(NO_ANOMALIES));
    assert!(text.contains("[X100] Custom"));
}

#[test]
fn test_samples_limited_to_three() {
    let dir = create_test_dir();
    let path = write_report(dir.path(), &sample_report());

    let text = render_file(&path).unwrap();

    assert!(text.contains("→ Samples: bob@, x@@y.com, none"));
    assert!(!text.contains("extra"));
}

#[test]
fn test_missing_summary_is_malformed() {
    let dir = create_test_dir();
    let mut report = sample_report();
    report.as_object_mut().unwrap().remove("summary");
    let path = write_report(dir.path(), &report);

    let err = render_file(&path).unwrap_err();

    assert!(err.is_malformed());
    match err {
        ReportError::Malformed { path: Some(p), .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_missing_required_fields_are_malformed() {
    for field in ["pipeline_name", "run_timestamp", "spec_generated_by", "issues", "output_files"] {
        let mut report = sample_report();
        report.as_object_mut().unwrap().remove(field);

        let err = QualityReport::from_json(&report.to_string()).unwrap_err();
        assert!(err.is_malformed(), "removing {field}");
    }
}

#[test]
fn test_missing_summary_key_is_malformed() {
    let mut report = sample_report();
    report["summary"].as_object_mut().unwrap().remove("pass_rate_pct");

    let err = QualityReport::from_json(&report.to_string()).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_invalid_json_is_malformed() {
    let dir = create_test_dir();
    let path = write_file(dir.path(), "data/quality_report.json", "{ not json");

    let err = render_file(&path).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = create_test_dir();

    let err = render_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}
