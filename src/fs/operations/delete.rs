//! Directory removal.

use tracing::info;

use super::{MSG_REMOVED, MSG_SHOULD_EXIST, Reconciler};
use crate::error::Result;
use crate::fs::existence::resolve;
use crate::fs::status::{DirectoryStatus, OperationResponse};
use crate::session::with_session;
use crate::validate::{self, PathInput};

impl Reconciler {
    /// Delete the existing subset of `target_folder`, recursively.
    pub async fn delete(&self, target_folder: &PathInput) -> Result<OperationResponse> {
        validate::delete_directory(target_folder)?;
        let targets = target_folder.to_vec();
        let concurrency = self.concurrency;

        with_session(self.station(), |session| async move {
            let partition = resolve(&session, &targets, concurrency).await?;
            let Some(present) = partition.existing else {
                info!(count = targets.len(), "nothing to delete");
                return Ok(OperationResponse::new(
                    MSG_SHOULD_EXIST,
                    DirectoryStatus::non_existing(partition.new),
                ));
            };

            session.delete(&present).await?;

            Ok(OperationResponse::new(
                MSG_REMOVED,
                DirectoryStatus::new(Some(present), partition.new),
            ))
        })
        .await
    }
}
