use anyhow::Result;
use async_trait::async_trait;
use rusoto_core::ByteStream;

#[cfg(test)]
use mockall::automock;

/// One whole-object upload.
///
/// The body owns the open file; dropping the request releases it.
pub struct PutRequest {
    pub bucket: String,
    pub key: String,
    pub body: ByteStream,
    /// Exact byte length of `body`, read once before the upload
    pub content_length: u64,
    pub content_type: String,
}

impl std::fmt::Debug for PutRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PutRequest")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("content_length", &self.content_length)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// The object-store operations the upload step relies on.
///
/// Implemented for the S3 client in [`crate::cloud::s3`]; tests substitute a
/// mock or an in-memory store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether `bucket` exists and is visible to the caller
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// Create `bucket`
    async fn make_bucket(&self, bucket: &str) -> Result<()>;

    /// Store the request body under its key, replacing any existing object
    async fn put_object(&self, request: PutRequest) -> Result<()>;
}
