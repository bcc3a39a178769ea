//! JSON metadata sidecar for a finished corpus build.

use crate::domain::{CorpusOutcome, REPORT_SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

pub fn write_report(
    report_path: &Path,
    repository: &str,
    outcome: &CorpusOutcome,
    max_bytes: u64,
    include_timestamp: bool,
) -> Result<()> {
    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("repository".to_string(), Value::String(repository.to_string()));
    report.insert(
        "output_path".to_string(),
        Value::String(outcome.output_path.display().to_string()),
    );
    report.insert("file_count".to_string(), json!(outcome.file_count));
    report.insert("total_bytes".to_string(), json!(outcome.total_bytes));
    report.insert("max_bytes".to_string(), json!(max_bytes));
    report.insert("is_complete".to_string(), json!(outcome.is_complete));
    report.insert("files".to_string(), serde_json::to_value(&outcome.included)?);
    if !outcome.skipped.is_empty() {
        report.insert("skipped".to_string(), serde_json::to_value(&outcome.skipped)?);
    }

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_report;
    use crate::domain::{CorpusOutcome, SkippedFile};
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn outcome() -> CorpusOutcome {
        CorpusOutcome {
            output_path: PathBuf::from("/tmp/demo/demo_corpus_20240101T000000Z.md"),
            file_count: 2,
            total_bytes: 1234,
            is_complete: false,
            included: vec!["README.md".to_string(), "src/app.py".to_string()],
            skipped: vec![SkippedFile {
                relative_path: "secret.py".to_string(),
                reason: "Permission denied".to_string(),
            }],
        }
    }

    #[test]
    fn report_contains_build_metadata() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join("out/report.json");

        write_report(&report_path, "demo", &outcome(), 460_800, false).expect("write report");

        let content = fs::read_to_string(report_path).expect("read report");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("json");
        assert!(parsed.get("generated_at").is_none());
        assert_eq!(parsed["repository"], json!("demo"));
        assert_eq!(parsed["file_count"], json!(2));
        assert_eq!(parsed["is_complete"], json!(false));
        assert_eq!(parsed["max_bytes"], json!(460_800));
        assert_eq!(parsed["files"][1], json!("src/app.py"));
        assert_eq!(parsed["skipped"][0]["relative_path"], json!("secret.py"));
    }

    #[test]
    fn report_includes_timestamp_when_enabled() {
        let tmp = TempDir::new().expect("tmp");
        let report_path = tmp.path().join("report.json");
        let mut clean = outcome();
        clean.skipped.clear();

        write_report(&report_path, "demo", &clean, 10, true).expect("write report");

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report_path).expect("read")).expect("json");
        assert!(parsed["generated_at"].as_str().is_some_and(|s| s.ends_with("+00:00")));
        assert!(parsed.get("skipped").is_none());
    }
}
