//! The upload step: bucket provisioning, discovery and the per-file upload loop.
//!
//! Files are uploaded sequentially, one whole-object put each. A failure on
//! one file is recorded as a [`crate::models::FileOutcome::Failed`] and the
//! loop moves on; the run as a whole is then reported as degraded.
//!
//! ```no_run
//! use artifact_uploader::cloud::s3::S3Store;
//! use artifact_uploader::config::{build_environment, UploadConfig};
//! use artifact_uploader::models::RunOutcome;
//! use artifact_uploader::upload::UploadStep;
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = UploadConfig::from_yaml_file(Path::new("upload.yaml"))?;
//! let store = S3Store::connect(&config.host, &config.region, config.credentials_id.as_deref())?;
//! let env = build_environment(&[]);
//!
//! let summary = UploadStep::new(&store, &config, Path::new("."), &env).run().await?;
//! if summary.outcome() == RunOutcome::Degraded {
//!     eprintln!("some files failed: {:?}", summary.failed_sources());
//! }
//! # Ok(())
//! # }
//! ```

/// Step orchestration
pub mod step;

/// Key planning and the upload loop
pub mod uploader;

pub use step::{run_against_s3, UploadStep};
pub use uploader::{open_body, plan_uploads, upload_files, PlannedUpload};
