//! Batch existence checks.

use std::collections::HashMap;

use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info};

use crate::error::Result;
use crate::session::Session;

/// Default number of listing requests in flight per batch.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Split of a path batch into paths absent from and present on the NAS.
///
/// Both buckets keep input order, hold each distinct path once, and are
/// `None` rather than empty. `presence` is aligned with the input batch
/// position by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistencePartition {
    pub new: Option<Vec<String>>,
    pub existing: Option<Vec<String>>,
    presence: Vec<bool>,
}

impl ExistencePartition {
    /// Build from a batch and its position-aligned presence flags.
    pub fn from_presence(batch: &[String], presence: Vec<bool>) -> Self {
        let mut new = Vec::new();
        let mut existing = Vec::new();
        for (path, present) in batch.iter().zip(&presence) {
            let bucket = if *present { &mut existing } else { &mut new };
            if !bucket.contains(path) {
                bucket.push(path.clone());
            }
        }
        Self {
            new: (!new.is_empty()).then_some(new),
            existing: (!existing.is_empty()).then_some(existing),
            presence,
        }
    }

    /// Whether the path at `index` in the input batch exists.
    pub fn is_existing(&self, index: usize) -> bool {
        self.presence.get(index).copied().unwrap_or(false)
    }

    pub fn presence(&self) -> &[bool] {
        &self.presence
    }

    pub fn all_new(&self) -> bool {
        self.existing.is_none()
    }

    pub fn all_existing(&self) -> bool {
        self.new.is_none()
    }

    pub fn new_paths(&self) -> &[String] {
        self.new.as_deref().unwrap_or_default()
    }

    pub fn existing_paths(&self) -> &[String] {
        self.existing.as_deref().unwrap_or_default()
    }
}

/// Check every path of `batch` against the NAS.
///
/// A listable path exists; a "no such file or directory" answer means it
/// does not. Any other failure aborts the whole batch and is returned as is.
/// Duplicate paths are queried once. At most `concurrency` listings are in
/// flight at a time.
pub async fn resolve(
    session: &Session,
    batch: &[String],
    concurrency: usize,
) -> Result<ExistencePartition> {
    let mut unique: Vec<&str> = Vec::new();
    for path in batch {
        if !unique.contains(&path.as_str()) {
            unique.push(path);
        }
    }

    let checked: Vec<(&str, bool)> = stream::iter(unique)
        .map(|path| async move {
            debug!(path, "validating path");
            match session.list_folder(path).await {
                Ok(_) => Ok((path, true)),
                Err(e) if e.is_not_found() => Ok((path, false)),
                Err(e) => Err(e),
            }
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let lookup: HashMap<&str, bool> = checked.into_iter().collect();
    let presence = batch
        .iter()
        .map(|path| lookup.get(path.as_str()).copied().unwrap_or(false))
        .collect();
    let partition = ExistencePartition::from_presence(batch, presence);

    info!(
        host = %session.host(),
        new = partition.new_paths().len(),
        existing = partition.existing_paths().len(),
        "resolved path batch"
    );
    Ok(partition)
}
