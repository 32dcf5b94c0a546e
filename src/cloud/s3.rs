use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use rusoto_core::{Region, RusotoError};
use rusoto_s3::{
    CreateBucketConfiguration, CreateBucketError, CreateBucketRequest, HeadBucketError,
    HeadBucketRequest, PutObjectRequest, S3Client, S3,
};

use crate::cloud::client::create_s3_client;
use crate::cloud::store::{ObjectStore, PutRequest};
use crate::constants::DEFAULT_REGION;

/// [`ObjectStore`] backed by an S3-compatible endpoint.
///
/// # Example
///
/// ```no_run
/// # use artifact_uploader::cloud::s3::S3Store;
/// # fn example() -> anyhow::Result<()> {
/// let store = S3Store::connect("http://minio.internal:9000", "us-east-1", Some("ci"))?;
/// assert_eq!(store.region().name(), "us-east-1");
/// # Ok(())
/// # }
/// ```
pub struct S3Store {
    client: Arc<S3Client>,
    region: Region,
}

impl S3Store {
    pub fn new(client: Arc<S3Client>, region: Region) -> Self {
        S3Store { client, region }
    }

    /// Build the client and wrap it
    pub fn connect(host: &str, region_name: &str, profile: Option<&str>) -> Result<Self> {
        let (client, region) = create_s3_client(host, region_name, profile)?;
        Ok(S3Store::new(client, region))
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Location constraint for CreateBucket; the default region takes none
    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        let name = self.region.name();
        if name == DEFAULT_REGION {
            None
        } else {
            Some(CreateBucketConfiguration {
                location_constraint: Some(name.to_string()),
            })
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let request = HeadBucketRequest {
            bucket: bucket.to_string(),
            ..Default::default()
        };

        match self.client.head_bucket(request).await {
            Ok(_) => Ok(true),
            Err(RusotoError::Service(HeadBucketError::NoSuchBucket(_))) => Ok(false),
            // HEAD responses carry no body, so a missing bucket often surfaces as a bare 404
            Err(RusotoError::Unknown(response)) if response.status.as_u16() == 404 => Ok(false),
            Err(e) => Err(anyhow!("HeadBucket request for {} failed: {}", bucket, e)),
        }
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let request = CreateBucketRequest {
            bucket: bucket.to_string(),
            create_bucket_configuration: self.bucket_configuration(),
            ..Default::default()
        };

        match self.client.create_bucket(request).await {
            Ok(_) => {
                info!("Created bucket {} in region {}", bucket, self.region.name());
                Ok(())
            }
            Err(RusotoError::Service(CreateBucketError::BucketAlreadyOwnedByYou(_))) => {
                debug!("Bucket {} was created concurrently, continuing", bucket);
                Ok(())
            }
            Err(e) => Err(anyhow!("CreateBucket request for {} failed: {}", bucket, e)),
        }
    }

    async fn put_object(&self, request: PutRequest) -> Result<()> {
        let PutRequest {
            bucket,
            key,
            body,
            content_length,
            content_type,
        } = request;

        let length = i64::try_from(content_length)
            .context(format!("File too large to upload as {}", key))?;

        let put = PutObjectRequest {
            bucket: bucket.clone(),
            key: key.clone(),
            body: Some(body),
            content_length: Some(length),
            content_type: Some(content_type),
            ..Default::default()
        };

        self.client
            .put_object(put)
            .await
            .context(format!("PutObject s3://{}/{} failed", bucket, key))?;

        debug!("Stored s3://{}/{} ({} bytes)", bucket, key, content_length);
        Ok(())
    }
}
