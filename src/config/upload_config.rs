use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTENT_TYPE, DEFAULT_REGION};

/// Everything one upload run needs, supplied by the invoking pipeline.
///
/// Loaded from YAML and/or assembled from command-line flags. It is not
/// modified once the run starts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UploadConfig {
    /// Object store endpoint, e.g. `http://minio.internal:9000`
    #[serde(default)]
    pub host: String,

    /// Signing region passed to the S3 client
    #[serde(default = "default_region")]
    pub region: String,

    /// Name of the credentials profile to sign requests with
    #[serde(default)]
    pub credentials_id: Option<String>,

    /// Destination bucket, created when missing
    #[serde(default)]
    pub bucket: String,

    /// Comma or semicolon separated glob patterns of files to upload
    #[serde(default = "default_includes")]
    pub includes: String,

    /// Comma or semicolon separated glob patterns of files to skip
    #[serde(default)]
    pub excludes: String,

    /// Directory below the workspace where matching starts
    #[serde(default)]
    pub start_folder: Option<String>,

    /// Key prefix prepended to every uploaded object
    #[serde(default)]
    pub target_folder: Option<String>,

    /// Mirror the directory layout below the start folder in object keys
    #[serde(default)]
    pub preserve_folder_structure: bool,

    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Skip version-control and editor scratch files
    #[serde(default = "default_true")]
    pub default_excludes: bool,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_includes() -> String {
    "**".to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            region: default_region(),
            credentials_id: None,
            bucket: String::new(),
            includes: default_includes(),
            excludes: String::new(),
            start_folder: None,
            target_folder: None,
            preserve_folder_structure: false,
            content_type: default_content_type(),
            default_excludes: true,
        }
    }
}

impl UploadConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: UploadConfig = serde_yaml::from_str(&content)
            .context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Write a template configuration a user can fill in
    pub fn create_default_config_file(path: &Path) -> Result<()> {
        let template = UploadConfig {
            host: "http://localhost:9000".to_string(),
            bucket: "artifacts".to_string(),
            includes: "**/*".to_string(),
            ..Default::default()
        };
        template.save_to_yaml_file(path)
    }

    /// Reject configurations that cannot possibly run
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("No object store host configured");
        }
        if self.bucket.trim().is_empty() {
            bail!("No target bucket configured");
        }
        if self.content_type.trim().is_empty() {
            bail!("Content type must not be empty");
        }
        Ok(())
    }

    /// Directory where matching starts: the workspace itself, or the
    /// configured start folder below it when that is not blank.
    pub fn start_path(&self, workspace: &Path) -> PathBuf {
        match self.start_folder.as_deref() {
            Some(folder) if !folder.trim().is_empty() => workspace.join(folder),
            _ => workspace.to_path_buf(),
        }
    }
}
