//! # artifact-uploader
//!
//! Uploads the files of a build workspace that match a set of Ant-style
//! glob patterns to an S3-compatible bucket.
//!
//! ## Overview
//!
//! One run of the upload step:
//!
//! 1. makes sure the target bucket exists, creating it when it is absent;
//! 2. expands `${VAR}` references in the patterns and target folder;
//! 3. lists the files below the start folder that match the includes and
//!    none of the excludes;
//! 4. uploads each file under `target_folder + key`, where the key is the
//!    path relative to the start folder or only the file name.
//!
//! A file that cannot be read or stored does not stop the run. It is
//! recorded in the [`models::UploadSummary`] and the overall outcome becomes
//! [`models::RunOutcome::Degraded`].
//!
//! ## Usage
//!
//! ```no_run
//! use artifact_uploader::cloud::s3::S3Store;
//! use artifact_uploader::config::{build_environment, UploadConfig};
//! use artifact_uploader::upload::UploadStep;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = UploadConfig {
//!     host: "http://minio:9000".to_string(),
//!     bucket: "builds".to_string(),
//!     includes: "**/*.txt".to_string(),
//!     start_folder: Some("build/out".to_string()),
//!     target_folder: Some("releases/${BUILD_NUMBER}".to_string()),
//!     preserve_folder_structure: true,
//!     ..Default::default()
//! };
//!
//! let store = S3Store::connect(&config.host, &config.region, None)?;
//! let env = build_environment(&[("BUILD_NUMBER".to_string(), "17".to_string())]);
//! let summary = UploadStep::new(&store, &config, Path::new("."), &env).run().await?;
//!
//! println!("{} uploaded, {} failed", summary.uploaded_count(), summary.failed_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`cloud`]: Object store abstraction, S3 client and bucket provisioning
//! - [`config`]: Configuration loading and variable expansion
//! - [`constants`]: Defaults and exit codes
//! - [`discovery`]: Glob matching, directory walking and relative paths
//! - [`models`]: Per-file and per-run results
//! - [`security`]: Credential scrubbing for logs and reports
//! - [`upload`]: The upload step and per-file loop
//! - [`utils`]: JSON run summary

pub mod cli;
pub mod cloud;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod models;
pub mod security;
pub mod upload;
pub mod utils;

#[cfg(test)]
pub mod test_utils;
