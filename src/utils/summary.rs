use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde_json::json;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::models::UploadSummary;
use crate::security::scrub_credentials;

/// Create a JSON report of one upload run.
///
/// # Example Output
///
/// ```json
/// {
///   "run_id": "550e8400-e29b-41d4-a716-446655440000",
///   "hostname": "ci-agent-07",
///   "finished_at": "2024-01-15T14:30:52+00:00",
///   "host": "http://minio:9000",
///   "bucket": "builds",
///   "outcome": "degraded",
///   "uploaded": 41,
///   "failed": 1,
///   "uploaded_bytes": 1048576,
///   "files": [...]
/// }
/// ```
pub fn create_upload_summary(config: &UploadConfig, summary: &UploadSummary) -> Result<String> {
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let report = json!({
        "run_id": Uuid::new_v4().to_string(),
        "hostname": hostname,
        "finished_at": Utc::now().to_rfc3339(),
        "uploader_version": env!("CARGO_PKG_VERSION"),
        "host": scrub_credentials(&config.host),
        "bucket": summary.bucket,
        "preserve_folder_structure": config.preserve_folder_structure,
        "outcome": summary.outcome(),
        "uploaded": summary.uploaded_count(),
        "failed": summary.failed_count(),
        "uploaded_bytes": summary.uploaded_bytes(),
        "files": summary.files,
    });

    serde_json::to_string_pretty(&report).context("Failed to serialize upload summary to JSON")
}

/// Write the JSON report to `path`
pub fn write_upload_summary(path: &Path, config: &UploadConfig, summary: &UploadSummary) -> Result<()> {
    let json = create_upload_summary(config, summary)?;
    fs::write(path, json).context(format!("Failed to write upload summary to {}", path.display()))?;
    info!("Upload summary written to {}", path.display());
    Ok(())
}
