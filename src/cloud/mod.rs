//! Object storage integration for artifact uploads.
//!
//! The upload step only needs three operations from the object store:
//! checking that a bucket exists, creating it, and storing one whole object.
//! They are captured by the [`store::ObjectStore`] trait so that the step can
//! run against any S3-compatible endpoint (AWS, MinIO, Ceph RGW, ...) or an
//! in-memory stand-in during tests.
//!
//! ## Usage Example
//!
//! ```no_run
//! use artifact_uploader::cloud::bucket::ensure_bucket_exists;
//! use artifact_uploader::cloud::s3::S3Store;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = S3Store::connect("http://minio.internal:9000", "us-east-1", None)?;
//! ensure_bucket_exists(&store, "nightly-builds").await?;
//! # Ok(())
//! # }
//! ```

/// Bucket provisioning
pub mod bucket;

/// S3 client construction for custom endpoints
pub mod client;

/// S3-backed object store
pub mod s3;

/// Object store abstraction
pub mod store;
