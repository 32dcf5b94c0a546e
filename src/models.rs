use serde::{Serialize, Deserialize};

/// Terminal status of an upload run.
///
/// A run starts `Unchanged` and becomes `Degraded` once any single file
/// failed to upload. It never goes back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Unchanged,
    Degraded,
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Unchanged => write!(f, "unchanged"),
            RunOutcome::Degraded => write!(f, "degraded"),
        }
    }
}

/// Result of attempting to upload one matched file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Uploaded {
        source: String,
        key: String,
        bytes: u64,
    },
    Failed {
        source: String,
        key: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn key(&self) -> &str {
        match self {
            FileOutcome::Uploaded { key, .. } | FileOutcome::Failed { key, .. } => key,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Outcomes of every file attempted during one run, in attempt order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UploadSummary {
    pub bucket: String,
    pub files: Vec<FileOutcome>,
}

impl UploadSummary {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            files: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    /// Degraded as soon as one recorded file failed
    pub fn outcome(&self) -> RunOutcome {
        if self.files.iter().any(FileOutcome::is_failure) {
            RunOutcome::Degraded
        } else {
            RunOutcome::Unchanged
        }
    }

    pub fn uploaded_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_failure()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_failure()).count()
    }

    pub fn uploaded_bytes(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match f {
                FileOutcome::Uploaded { bytes, .. } => *bytes,
                FileOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    /// Source paths of the files that failed, for reporting
    pub fn failed_sources(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter_map(|f| match f {
                FileOutcome::Failed { source, .. } => Some(source.as_str()),
                FileOutcome::Uploaded { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(key: &str, bytes: u64) -> FileOutcome {
        FileOutcome::Uploaded {
            source: format!("/ws/{}", key),
            key: key.to_string(),
            bytes,
        }
    }

    fn failed(key: &str) -> FileOutcome {
        FileOutcome::Failed {
            source: format!("/ws/{}", key),
            key: key.to_string(),
            reason: "boom".to_string(),
        }
    }

    #[test]
    fn test_empty_summary_is_unchanged() {
        let summary = UploadSummary::new("bucket");
        assert_eq!(summary.outcome(), RunOutcome::Unchanged);
        assert_eq!(summary.uploaded_count(), 0);
        assert_eq!(summary.failed_count(), 0);
    }

    #[test]
    fn test_single_failure_degrades_and_stays_degraded() {
        let mut summary = UploadSummary::new("bucket");
        summary.record(uploaded("a.txt", 3));
        assert_eq!(summary.outcome(), RunOutcome::Unchanged);

        summary.record(failed("b.txt"));
        assert_eq!(summary.outcome(), RunOutcome::Degraded);

        summary.record(uploaded("c.txt", 4));
        assert_eq!(summary.outcome(), RunOutcome::Degraded);
        assert_eq!(summary.uploaded_count(), 2);
        assert_eq!(summary.failed_count(), 1);
        assert_eq!(summary.uploaded_bytes(), 7);
        assert_eq!(summary.failed_sources(), vec!["/ws/b.txt"]);
    }

    #[test]
    fn test_file_outcome_serialization() {
        let json = serde_json::to_string(&failed("x.bin")).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"reason\":\"boom\""));

        let back: FileOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.key(), "x.bin");
        assert!(back.is_failure());
    }

    #[test]
    fn test_run_outcome_display() {
        assert_eq!(RunOutcome::Unchanged.to_string(), "unchanged");
        assert_eq!(RunOutcome::Degraded.to_string(), "degraded");
    }
}
