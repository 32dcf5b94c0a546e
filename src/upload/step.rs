use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::cloud::bucket::ensure_bucket_exists;
use crate::cloud::s3::S3Store;
use crate::cloud::store::ObjectStore;
use crate::config::{expand, normalize_target_folder, UploadConfig};
use crate::discovery::FileMatcher;
use crate::models::{RunOutcome, UploadSummary};
use crate::upload::uploader::{plan_uploads, upload_files};

/// One execution of the upload step against a workspace.
pub struct UploadStep<'a> {
    store: &'a dyn ObjectStore,
    config: &'a UploadConfig,
    workspace: PathBuf,
    env: &'a HashMap<String, String>,
}

impl<'a> UploadStep<'a> {
    pub fn new(
        store: &'a dyn ObjectStore,
        config: &'a UploadConfig,
        workspace: &Path,
        env: &'a HashMap<String, String>,
    ) -> Self {
        UploadStep {
            store,
            config,
            workspace: workspace.to_path_buf(),
            env,
        }
    }

    /// Provision the bucket, discover files and upload them.
    ///
    /// Errors returned here are fatal for the step. Per-file failures are
    /// reported through the summary instead.
    pub async fn run(&self) -> Result<UploadSummary> {
        let bucket = self.config.bucket.as_str();
        ensure_bucket_exists(self.store, bucket).await?;

        let includes = expand(&self.config.includes, self.env);
        let excludes = expand(&self.config.excludes, self.env);
        let target_folder = normalize_target_folder(&expand(
            self.config.target_folder.as_deref().unwrap_or_default(),
            self.env,
        ));
        debug!(
            "Expanded includes '{}', excludes '{}', target folder '{}'",
            includes, excludes, target_folder
        );

        let start = self.config.start_path(&self.workspace);
        let matcher = FileMatcher::new(&includes, &excludes, self.config.default_excludes)
            .context("Failed to compile file patterns")?;
        let files = matcher
            .list(&start)
            .context(format!("Failed to list files below {}", start.display()))?;

        info!(
            "Found {} file(s) below {} matching '{}'",
            files.len(),
            start.display(),
            includes
        );

        let plan = plan_uploads(files, &target_folder, self.config.preserve_folder_structure);
        let summary = upload_files(self.store, bucket, &self.config.content_type, plan).await;

        match summary.outcome() {
            RunOutcome::Unchanged => info!(
                "Uploaded {} file(s), {} bytes, to bucket {}",
                summary.uploaded_count(),
                summary.uploaded_bytes(),
                bucket
            ),
            RunOutcome::Degraded => warn!(
                "Uploaded {} of {} file(s) to bucket {}; failed: {}",
                summary.uploaded_count(),
                summary.files.len(),
                bucket,
                summary.failed_sources().join(", ")
            ),
        }

        Ok(summary)
    }
}

/// Connect to the configured S3 endpoint and run the step against it.
///
/// The client is built inside the calling runtime, which is the runtime that
/// then drives its requests.
pub async fn run_against_s3(
    config: &UploadConfig,
    workspace: &Path,
    env: &HashMap<String, String>,
) -> Result<UploadSummary> {
    let store = S3Store::connect(&config.host, &config.region, config.credentials_id.as_deref())?;
    UploadStep::new(&store, config, workspace, env).run().await
}
