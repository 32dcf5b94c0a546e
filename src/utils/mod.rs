//! Reporting utilities.
//!
//! ### Writing a Run Summary
//!
//! ```no_run
//! use artifact_uploader::config::UploadConfig;
//! use artifact_uploader::models::UploadSummary;
//! use artifact_uploader::utils::summary::write_upload_summary;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = UploadConfig::default();
//! let summary = UploadSummary::new("builds");
//! write_upload_summary(Path::new("upload-summary.json"), &config, &summary)?;
//! # Ok(())
//! # }
//! ```

/// JSON run summary generation
pub mod summary;
