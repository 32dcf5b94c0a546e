//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use artifact_uploader::cloud::store::{ObjectStore, PutRequest};

/// In-memory object store keyed by bucket, then object key
#[derive(Default)]
pub struct MemoryStore {
    buckets: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    failing_keys: HashSet<String>,
    created: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose puts for the given keys always fail
    pub fn failing_on(keys: &[&str]) -> Self {
        MemoryStore {
            failing_keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_bucket(self, bucket: &str) -> Self {
        self.buckets
            .lock()
            .unwrap()
            .insert(bucket.to_string(), HashMap::new());
        self
    }

    /// Sorted keys stored in `bucket`
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let buckets = self.buckets.lock().unwrap();
        let mut keys: Vec<String> = buckets
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        let buckets = self.buckets.lock().unwrap();
        buckets.get(bucket).and_then(|objects| objects.get(key).cloned())
    }

    /// Buckets created through `make_bucket`, in call order
    pub fn created_buckets(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        Ok(self.buckets.lock().unwrap().contains_key(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> Result<()> {
        let mut buckets = self.buckets.lock().unwrap();
        if buckets.contains_key(bucket) {
            bail!("BucketAlreadyOwnedByYou: {}", bucket);
        }
        buckets.insert(bucket.to_string(), HashMap::new());
        self.created.lock().unwrap().push(bucket.to_string());
        Ok(())
    }

    async fn put_object(&self, request: PutRequest) -> Result<()> {
        if self.failing_keys.contains(&request.key) {
            bail!("simulated failure storing {}", request.key);
        }

        let mut data = Vec::new();
        request.body.into_async_read().read_to_end(&mut data).await?;
        if data.len() as u64 != request.content_length {
            bail!(
                "length mismatch for {}: declared {}, read {}",
                request.key,
                request.content_length,
                data.len()
            );
        }

        let mut buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get_mut(&request.bucket)
            .ok_or_else(|| anyhow!("NoSuchBucket: {}", request.bucket))?;
        objects.insert(request.key, data);
        Ok(())
    }
}

/// Writes a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
