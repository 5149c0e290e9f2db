//! Remote folder listing types.

use serde::{Deserialize, Serialize};

/// One entry of a `SYNO.FileStation.List` `list` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Entry name
    pub name: String,
    /// Absolute path, starting with the shared folder
    pub path: String,
    /// Whether the entry is a directory
    #[serde(default)]
    pub isdir: bool,
}

impl FolderEntry {
    pub fn is_dir(&self) -> bool {
        self.isdir
    }
}

/// A top-level folder exported by the NAS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedFolder {
    /// Share name, e.g. `photos`
    pub name: String,
    /// Share path, e.g. `/photos`
    pub path: String,
}
