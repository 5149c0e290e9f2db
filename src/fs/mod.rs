//! Directory reconciliation against the NAS.

pub mod existence;
pub(crate) mod node;
pub mod operations;
mod status;

pub use existence::{ExistencePartition, resolve};
pub use node::{FolderEntry, SharedFolder};
pub use operations::Reconciler;
pub use status::{DirectoryStatus, OperationResponse};
