//! Directory moves.

use tracing::info;

use super::{MSG_DEST_SHOULD_NOT_EXIST, MSG_MOVED, MSG_TARGET_SHOULD_EXIST, Reconciler};
use crate::error::Result;
use crate::fs::existence::resolve;
use crate::fs::status::{DirectoryStatus, OperationResponse};
use crate::session::with_session;
use crate::validate::{self, PathInput};

impl Reconciler {
    /// Move each `target_folder[i]` to `dest_folder_path[i]`.
    ///
    /// All-or-nothing: every target must exist and no destination may exist,
    /// otherwise nothing is moved and the offending paths are reported.
    pub async fn move_directory(
        &self,
        target_folder: &PathInput,
        dest_folder_path: &PathInput,
    ) -> Result<OperationResponse> {
        validate::move_directory(target_folder, dest_folder_path)?;
        let targets = target_folder.to_vec();
        let destinations = dest_folder_path.to_vec();
        let concurrency = self.concurrency;

        with_session(self.station(), |session| async move {
            let target_check = resolve(&session, &targets, concurrency).await?;
            if !target_check.all_existing() {
                info!("move aborted, missing targets");
                return Ok(OperationResponse::new(
                    MSG_TARGET_SHOULD_EXIST,
                    DirectoryStatus::non_existing(target_check.new),
                ));
            }

            let dest_check = resolve(&session, &destinations, concurrency).await?;
            if !dest_check.all_new() {
                info!("move aborted, destinations already exist");
                return Ok(OperationResponse::new(
                    MSG_DEST_SHOULD_NOT_EXIST,
                    DirectoryStatus::existing(dest_check.existing),
                ));
            }

            // Both checks passed, so every position is a target-present /
            // destination-free pair.
            session.move_to(&targets, &destinations).await?;

            Ok(OperationResponse::new(
                MSG_MOVED,
                DirectoryStatus::new(target_check.existing, dest_check.new),
            ))
        })
        .await
    }
}
