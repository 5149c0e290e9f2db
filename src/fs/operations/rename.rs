//! Directory renames.

use tracing::info;

use super::{MSG_ALL_TARGETS_EXIST, MSG_RENAMED, MSG_SHOULD_EXIST, Reconciler};
use crate::error::Result;
use crate::fs::existence::resolve;
use crate::fs::status::{DirectoryStatus, OperationResponse};
use crate::path::{reconcile_rename_pairs, sibling_path};
use crate::session::with_session;
use crate::validate::{self, PathInput};

impl Reconciler {
    /// Rename each `target_folder[i]` to `changed_name_into[i]` in place.
    ///
    /// Missing targets are dropped together with their new name. Pairs whose
    /// new sibling path is already taken are skipped. The remaining pairs are
    /// renamed in a single call.
    pub async fn rename(
        &self,
        target_folder: &PathInput,
        changed_name_into: &PathInput,
    ) -> Result<OperationResponse> {
        validate::rename_directory(target_folder, changed_name_into)?;
        let targets = target_folder.to_vec();
        let names = changed_name_into.to_vec();
        let concurrency = self.concurrency;

        with_session(self.station(), |session| async move {
            let target_check = resolve(&session, &targets, concurrency).await?;
            if target_check.existing.is_none() {
                info!(count = targets.len(), "no rename target exists");
                return Ok(OperationResponse::new(
                    MSG_SHOULD_EXIST,
                    DirectoryStatus::non_existing(target_check.new),
                ));
            }

            let (live_targets, live_names): (Vec<String>, Vec<String>) = targets
                .iter()
                .zip(&names)
                .enumerate()
                .filter(|(idx, _)| target_check.is_existing(*idx))
                .map(|(_, (target, name))| (target.clone(), name.clone()))
                .unzip();

            let candidates: Vec<String> = live_targets
                .iter()
                .zip(&live_names)
                .map(|(target, name)| sibling_path(target, name))
                .collect();
            let candidate_check = resolve(&session, &candidates, concurrency).await?;

            let (safe_targets, safe_names) = reconcile_rename_pairs(
                &live_targets,
                &live_names,
                candidate_check.new_paths(),
            );
            if safe_targets.is_empty() {
                info!("every rename candidate is taken");
                return Ok(OperationResponse::new(
                    MSG_ALL_TARGETS_EXIST,
                    DirectoryStatus::new(candidate_check.existing, target_check.new),
                ));
            }

            session.rename(&safe_targets, &safe_names).await?;

            Ok(OperationResponse::new(
                MSG_RENAMED,
                DirectoryStatus::new(candidate_check.existing, candidate_check.new),
            ))
        })
        .await
    }
}
