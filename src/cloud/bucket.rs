use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::cloud::store::ObjectStore;

/// Make sure `bucket` exists, creating it when it does not.
///
/// Any error from the store is returned to the caller; the upload step
/// treats it as fatal because nothing can be stored without the bucket.
pub async fn ensure_bucket_exists(store: &dyn ObjectStore, bucket: &str) -> Result<()> {
    if bucket.trim().is_empty() {
        bail!("Bucket name must not be empty");
    }

    let exists = store
        .bucket_exists(bucket)
        .await
        .context(format!("Failed to check whether bucket {} exists", bucket))?;

    if exists {
        debug!("Bucket {} already exists", bucket);
        return Ok(());
    }

    info!("Bucket {} does not exist, creating it", bucket);
    store
        .make_bucket(bucket)
        .await
        .context(format!("Failed to create bucket {}", bucket))
}
