use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::UploadConfig;

/// Command-line arguments for artifact-uploader.
///
/// Every option except `--config`, `--workspace`, `--env`, `--summary` and
/// `--verbose` overrides the matching field of the YAML configuration.
#[derive(Parser, Debug)]
#[clap(
    name = "artifact-uploader",
    version,
    about = "Upload build artifacts matching a glob to an S3-compatible bucket"
)]
pub struct Args {
    /// Path to configuration YAML file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Workspace root; relative start folders resolve against it
    #[clap(short, long, default_value = ".")]
    pub workspace: PathBuf,

    /// Storage endpoint URL, e.g. http://minio:9000
    #[clap(long)]
    pub host: Option<String>,

    /// Region name used for signing and bucket creation
    #[clap(long)]
    pub region: Option<String>,

    /// Credentials profile to sign requests with
    #[clap(long)]
    pub credentials_id: Option<String>,

    /// Target bucket name
    #[clap(short, long)]
    pub bucket: Option<String>,

    /// Include patterns, comma or semicolon separated (supports ${VAR})
    #[clap(short, long)]
    pub includes: Option<String>,

    /// Exclude patterns, comma or semicolon separated (supports ${VAR})
    #[clap(short, long)]
    pub excludes: Option<String>,

    /// Folder to search from, relative to the workspace
    #[clap(short, long)]
    pub start_folder: Option<String>,

    /// Key prefix inside the bucket (supports ${VAR})
    #[clap(short, long)]
    pub target_folder: Option<String>,

    /// Keep paths relative to the start folder in object keys
    #[clap(short, long)]
    pub preserve_folder_structure: bool,

    /// Content type stored with every object
    #[clap(long)]
    pub content_type: Option<String>,

    /// Do not apply the built-in exclude list (.git, .svn, *~ ...)
    #[clap(long)]
    pub no_default_excludes: bool,

    /// Extra variable for pattern expansion, as KEY=VALUE (repeatable)
    #[clap(long = "env", value_name = "KEY=VALUE")]
    pub env: Vec<String>,

    /// Write a JSON run summary to this path
    #[clap(long)]
    pub summary: Option<PathBuf>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "upload.yaml")]
        path: PathBuf,
    },
}

impl Args {
    /// Overlay command-line values on a loaded configuration
    pub fn apply_to(&self, config: &mut UploadConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(region) = &self.region {
            config.region = region.clone();
        }
        if let Some(credentials_id) = &self.credentials_id {
            config.credentials_id = Some(credentials_id.clone());
        }
        if let Some(bucket) = &self.bucket {
            config.bucket = bucket.clone();
        }
        if let Some(includes) = &self.includes {
            config.includes = includes.clone();
        }
        if let Some(excludes) = &self.excludes {
            config.excludes = excludes.clone();
        }
        if let Some(start_folder) = &self.start_folder {
            config.start_folder = Some(start_folder.clone());
        }
        if let Some(target_folder) = &self.target_folder {
            config.target_folder = Some(target_folder.clone());
        }
        if let Some(content_type) = &self.content_type {
            config.content_type = content_type.clone();
        }
        if self.preserve_folder_structure {
            config.preserve_folder_structure = true;
        }
        if self.no_default_excludes {
            config.default_excludes = false;
        }
    }
}
