//! Reconciliation operations split into focused modules.
//!
//! Each operation validates its payload locally, opens one session, checks
//! existence of the relevant path batches, mutates only the safe subset in a
//! single remote call, and always releases the session.

mod create;
mod delete;
mod mv;
mod rename;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::fs::existence::DEFAULT_CONCURRENCY;
use crate::station::FileStation;

pub(crate) const MSG_CREATED: &str = "Directory successfully created.";
pub(crate) const MSG_ALREADY_EXIST: &str = "Directory already exist.";
pub(crate) const MSG_REMOVED: &str = "Directory successfully removed.";
pub(crate) const MSG_SHOULD_EXIST: &str = "Input should be existing directory on NAS.";
pub(crate) const MSG_MOVED: &str = "Directory successfully moved.";
pub(crate) const MSG_TARGET_SHOULD_EXIST: &str =
    "Target folder should be existing directory on NAS.";
pub(crate) const MSG_DEST_SHOULD_NOT_EXIST: &str =
    "Destination folder should not already exist on NAS.";
pub(crate) const MSG_RENAMED: &str = "Directory renamed successfully.";
pub(crate) const MSG_ALL_TARGETS_EXIST: &str = "All target folder already exist.";

/// Runs directory operations against one NAS.
#[derive(Clone)]
pub struct Reconciler {
    station: Arc<dyn FileStation>,
    concurrency: usize,
}

impl Reconciler {
    pub fn new(station: Arc<dyn FileStation>) -> Self {
        Self {
            station,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Limit concurrent existence checks per batch.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub(crate) fn station(&self) -> Arc<dyn FileStation> {
        self.station.clone()
    }
}
