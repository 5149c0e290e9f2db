//! Outward-facing operation results.

use serde::{Deserialize, Serialize};

/// Which requested paths were found to exist and which were not.
///
/// Absent buckets serialise as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStatus {
    pub existing: Option<Vec<String>>,
    pub non_existing: Option<Vec<String>>,
}

impl DirectoryStatus {
    pub fn new(existing: Option<Vec<String>>, non_existing: Option<Vec<String>>) -> Self {
        Self {
            existing: existing.filter(|v| !v.is_empty()),
            non_existing: non_existing.filter(|v| !v.is_empty()),
        }
    }

    pub fn existing(paths: Option<Vec<String>>) -> Self {
        Self::new(paths, None)
    }

    pub fn non_existing(paths: Option<Vec<String>>) -> Self {
        Self::new(None, paths)
    }
}

/// Response of one directory operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<DirectoryStatus>,
}

impl OperationResponse {
    pub fn new(message: impl Into<String>, data: DirectoryStatus) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}
