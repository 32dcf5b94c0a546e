use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures_util::TryStreamExt;
use log::{info, warn};
use rusoto_core::ByteStream;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

use crate::cloud::store::{ObjectStore, PutRequest};
use crate::discovery::{destination_key, MatchedFile};
use crate::models::{FileOutcome, UploadSummary};
use crate::security::scrub_credentials;

/// A matched file paired with the key it will be stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub source: PathBuf,
    /// Key suffix without the target-folder prefix, shown in progress output
    pub name: String,
    pub key: String,
}

/// Compute destination keys for every matched file.
///
/// `prefix` must already be normalized (empty, or ending in `/`).
pub fn plan_uploads(files: Vec<MatchedFile>, prefix: &str, preserve_structure: bool) -> Vec<PlannedUpload> {
    files
        .into_iter()
        .map(|file| {
            let name = destination_key("", &file.relative, preserve_structure);
            let key = format!("{}{}", prefix, name);
            PlannedUpload {
                source: file.path,
                name,
                key,
            }
        })
        .collect()
}

/// Upload every planned file once, in order.
///
/// A failure on one file is recorded in the summary and does not stop the
/// remaining files.
pub async fn upload_files(
    store: &dyn ObjectStore,
    bucket: &str,
    content_type: &str,
    plan: Vec<PlannedUpload>,
) -> UploadSummary {
    let mut summary = UploadSummary::new(bucket);

    for item in plan {
        info!("Storing {} in bucket {}", item.name, bucket);

        let source = item.source.display().to_string();
        let outcome = match upload_one(store, bucket, content_type, &item).await {
            Ok(bytes) => FileOutcome::Uploaded {
                source,
                key: item.key,
                bytes,
            },
            Err(e) => {
                let reason = scrub_credentials(&format!("{:#}", e));
                warn!("Failed to store {} in bucket {}: {}", item.name, bucket, reason);
                FileOutcome::Failed {
                    source,
                    key: item.key,
                    reason,
                }
            }
        };
        summary.record(outcome);
    }

    summary
}

async fn upload_one(
    store: &dyn ObjectStore,
    bucket: &str,
    content_type: &str,
    item: &PlannedUpload,
) -> Result<u64> {
    let (body, length) = open_body(&item.source).await?;

    store
        .put_object(PutRequest {
            bucket: bucket.to_string(),
            key: item.key.clone(),
            body,
            content_length: length,
            content_type: content_type.to_string(),
        })
        .await?;

    Ok(length)
}

/// Open `path` as a sized byte stream.
///
/// The length is read once from the open handle. The handle moves into the
/// stream and is closed when the stream is dropped.
pub async fn open_body(path: &Path) -> Result<(ByteStream, u64)> {
    let file = File::open(path)
        .await
        .context(format!("Failed to open {} for upload", path.display()))?;

    let length = file
        .metadata()
        .await
        .context(format!("Failed to read metadata for {}", path.display()))?
        .len();

    let size_hint = usize::try_from(length)
        .context(format!("File too large to upload: {}", path.display()))?;

    let stream = FramedRead::new(file, BytesCodec::new()).map_ok(|chunk| chunk.freeze());
    Ok((ByteStream::new_with_size(stream, size_hint), length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::store::MockObjectStore;
    use crate::models::RunOutcome;
    use anyhow::anyhow;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    fn matched(start: &Path, relative: &str) -> MatchedFile {
        MatchedFile {
            path: start.join(relative),
            relative: relative.to_string(),
        }
    }

    #[test]
    fn test_plan_preserving_structure() {
        let start = Path::new("/ws/build/out");
        let plan = plan_uploads(
            vec![matched(start, "a.txt"), matched(start, "sub/b.txt")],
            "releases/",
            true,
        );

        let keys: Vec<&str> = plan.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["releases/a.txt", "releases/sub/b.txt"]);
        assert_eq!(plan[1].name, "sub/b.txt");
        assert_eq!(plan[1].source, PathBuf::from("/ws/build/out/sub/b.txt"));
    }

    #[test]
    fn test_plan_flattened() {
        let start = Path::new("/ws/build/out");
        let plan = plan_uploads(
            vec![matched(start, "a.txt"), matched(start, "sub/b.txt")],
            "releases/",
            false,
        );

        let keys: Vec<&str> = plan.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["releases/a.txt", "releases/b.txt"]);
    }

    #[test]
    fn test_plan_without_prefix() {
        let start = Path::new("/ws");
        let plan = plan_uploads(vec![matched(start, "x/y.bin")], "", true);
        assert_eq!(plan[0].key, "x/y.bin");
    }

    #[tokio::test]
    async fn test_open_body_reports_length_and_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        fs::write(&path, b"0123456789").unwrap();

        let (body, length) = open_body(&path).await.unwrap();
        assert_eq!(length, 10);

        let mut content = Vec::new();
        body.into_async_read().read_to_end(&mut content).await.unwrap();
        assert_eq!(content, b"0123456789");
    }

    #[tokio::test]
    async fn test_open_body_missing_file() {
        let result = open_body(Path::new("/nonexistent/data.bin")).await;
        assert!(result.unwrap_err().to_string().contains("Failed to open"));
    }

    #[tokio::test]
    async fn test_upload_sends_length_and_content_type() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"hello").unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_mock = Arc::clone(&seen);

        let mut store = MockObjectStore::new();
        store.expect_put_object().times(1).returning(move |request| {
            seen_in_mock.lock().unwrap().push((
                request.bucket.clone(),
                request.key.clone(),
                request.content_length,
                request.content_type.clone(),
            ));
            Ok(())
        });

        let plan = plan_uploads(vec![matched(temp_dir.path(), "a.txt")], "p/", false);
        let summary = upload_files(&store, "builds", "application/octet-stream", plan).await;

        assert_eq!(summary.outcome(), RunOutcome::Unchanged);
        assert_eq!(summary.uploaded_bytes(), 5);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[(
                "builds".to_string(),
                "p/a.txt".to_string(),
                5,
                "application/octet-stream".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_store_failure_degrades_but_continues() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }

        let mut store = MockObjectStore::new();
        store.expect_put_object().times(3).returning(|request| {
            if request.key == "b.txt" {
                Err(anyhow!("503 Slow Down"))
            } else {
                Ok(())
            }
        });

        let plan = plan_uploads(
            ["a.txt", "b.txt", "c.txt"]
                .iter()
                .map(|n| matched(temp_dir.path(), n))
                .collect(),
            "",
            false,
        );
        let summary = upload_files(&store, "builds", "application/octet-stream", plan).await;

        assert_eq!(summary.outcome(), RunOutcome::Degraded);
        assert_eq!(summary.uploaded_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        match &summary.files[1] {
            FileOutcome::Failed { key, reason, .. } => {
                assert_eq!(key, "b.txt");
                assert!(reason.contains("503 Slow Down"));
            }
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreadable_file_degrades_without_calling_store() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("present.txt"), b"ok").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|request| request.key == "present.txt")
            .times(1)
            .returning(|_| Ok(()));

        let plan = plan_uploads(
            vec![
                matched(temp_dir.path(), "vanished.txt"),
                matched(temp_dir.path(), "present.txt"),
            ],
            "",
            false,
        );
        let summary = upload_files(&store, "builds", "application/octet-stream", plan).await;

        assert_eq!(summary.outcome(), RunOutcome::Degraded);
        assert_eq!(summary.failed_sources().len(), 1);
        assert!(summary.failed_sources()[0].ends_with("vanished.txt"));
    }

    #[tokio::test]
    async fn test_empty_plan_is_unchanged() {
        let store = MockObjectStore::new();
        let summary = upload_files(&store, "builds", "application/octet-stream", Vec::new()).await;
        assert_eq!(summary.outcome(), RunOutcome::Unchanged);
        assert!(summary.files.is_empty());
    }
}
