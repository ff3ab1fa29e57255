//! Vector store, file and file batch types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateVectorStoreRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Uploaded file as returned by the files endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateFileBatchRequest {
    pub file_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileBatchStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl FileBatchStatus {
    /// Whether polling can stop.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FileCounts {
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileBatch {
    pub id: String,
    pub status: FileBatchStatus,
    #[serde(default)]
    pub file_counts: FileCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletionStatus {
    pub id: String,
    pub deleted: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_batch_status_is_not_settled() {
        let batch: FileBatch =
            serde_json::from_str(r#"{"id":"vsfb_1","status":"queued"}"#).unwrap();
        assert_eq!(batch.status, FileBatchStatus::Unknown);
        assert!(!batch.status.is_settled());
    }

    #[test]
    fn test_completed_batch_with_counts() {
        let batch: FileBatch = serde_json::from_str(
            r#"{"id":"vsfb_1","status":"completed","file_counts":{"completed":3,"total":3}}"#,
        )
        .unwrap();
        assert!(batch.status.is_settled());
        assert_eq!(batch.file_counts.completed, 3);
        assert_eq!(batch.file_counts.failed, 0);
    }
}
