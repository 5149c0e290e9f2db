//! Directory creation.

use tracing::info;

use super::{MSG_ALREADY_EXIST, MSG_CREATED, Reconciler};
use crate::error::Result;
use crate::fs::existence::resolve;
use crate::fs::status::{DirectoryStatus, OperationResponse};
use crate::path::{decompose_path, merge_path};
use crate::session::with_session;
use crate::validate::{self, PathInput};

impl Reconciler {
    /// Create `target_folder[i]` under `shared_folder[i]`.
    ///
    /// Paths that already exist are skipped and reported in `existing`; only
    /// the new ones are sent to the NAS, in a single call.
    ///
    /// # Example
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use nasdir::{PathInput, Reconciler};
    /// # async fn example(reconciler: Reconciler) -> nasdir::Result<()> {
    /// let response = reconciler
    ///     .create(&PathInput::from("/photos"), &PathInput::from("2024/june"))
    ///     .await?;
    /// println!("{}", response.message);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(
        &self,
        shared_folder: &PathInput,
        target_folder: &PathInput,
    ) -> Result<OperationResponse> {
        validate::create_directory(shared_folder, target_folder)?;
        let candidates = merge_path(shared_folder, target_folder)?;
        let requested_shares = shared_folder.to_vec();
        let concurrency = self.concurrency;

        with_session(self.station(), |session| async move {
            let shares = session.list_shares().await?;
            validate::shared_folders_known(&shares, &requested_shares)?;

            let partition = resolve(&session, &candidates, concurrency).await?;
            let Some(new) = partition.new else {
                info!(count = candidates.len(), "all directories already exist");
                return Ok(OperationResponse::new(
                    MSG_ALREADY_EXIST,
                    DirectoryStatus::existing(partition.existing),
                ));
            };

            let (parents, names): (Vec<String>, Vec<String>) =
                new.iter().map(|path| decompose_path(path)).unzip();
            session.create_folders(&parents, &names).await?;

            Ok(OperationResponse::new(
                MSG_CREATED,
                DirectoryStatus::new(partition.existing, Some(new)),
            ))
        })
        .await
    }
}
