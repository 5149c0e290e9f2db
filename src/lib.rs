//! # nasdir
//!
//! Directory management for Synology FileStation NAS servers.
//!
//! ## Features
//!
//! - **Reconciliation**: create, delete, move and rename batches of directories.
//!   Every batch is checked for existence first and only the safe subset is
//!   sent to the NAS, in one call per operation.
//!   - Repeating a create is a no-op that reports everything as existing.
//!   - Moves are all-or-nothing.
//!   - Renames skip pairs whose new name is already taken.
//! - **Validation**: payloads are checked locally before any network access.
//! - **Sessions**: one login per operation, released on every exit path.
//! - **Address book**: requests name a NAS by IP; only configured hosts are reachable.
//!
//! ## Example
//!
//! ```no_run
//! use nasdir::{Config, DirectoryManager, PathInput};
//! use nasdir::manager::CreateDirectoryRequest;
//!
//! # async fn example() -> nasdir::Result<()> {
//! let config = Config::load(None)?;
//! let manager = DirectoryManager::new(config)?;
//!
//! let response = manager
//!     .create(&CreateDirectoryRequest {
//!         ip_address: "192.168.100.101".to_string(),
//!         shared_folder: PathInput::from(vec!["/photos", "/music"]),
//!         target_folder: PathInput::from(vec!["2024", "2024"]),
//!     })
//!     .await?;
//! println!("{}: {:?}", response.message, response.data);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod manager;
pub mod path;
pub mod session;
pub mod station;
pub mod validate;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, NasError, Result};
pub use fs::{
    DirectoryStatus, ExistencePartition, FolderEntry, OperationResponse, Reconciler, SharedFolder,
};
pub use manager::{Connector, DirectoryManager, HttpConnector};
pub use session::{Session, SessionClient, with_session};
pub use station::FileStation;
pub use validate::PathInput;
