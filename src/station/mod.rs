//! Remote FileStation trait and implementations.
//!
//! [`FileStation`] is the seam between the reconciliation engine and the
//! wire. [`ApiClient`](crate::api::ApiClient) implements it over HTTP; the
//! in-memory `MockFileStation` (behind `cfg(test)` or the `mock` feature)
//! implements it over a set of paths.
//!
//! Every method except `login` takes the session id explicitly. Callers are
//! expected to go through [`Session`](crate::session::Session) rather than
//! threading sids by hand.

#[cfg(any(test, feature = "mock"))]
mod mock;

#[cfg(any(test, feature = "mock"))]
pub use self::mock::{MockCall, MockFileStation};

use async_trait::async_trait;

use crate::error::Result;
use crate::fs::{FolderEntry, SharedFolder};

/// Operations offered by a FileStation-compatible server.
#[async_trait]
pub trait FileStation: Send + Sync {
    /// Host the station talks to (used for logging only).
    fn host(&self) -> &str;

    /// Authenticate and return a fresh session id.
    async fn login(&self) -> Result<String>;

    /// Invalidate a session id.
    async fn logout(&self, sid: &str) -> Result<()>;

    /// List the shared folders exported by the server.
    async fn list_shares(&self, sid: &str) -> Result<Vec<SharedFolder>>;

    /// List the contents of a folder.
    ///
    /// A folder that does not exist must surface as an error for which
    /// [`NasError::is_not_found`](crate::NasError::is_not_found) is true.
    async fn list_folder(&self, sid: &str, folder_path: &str) -> Result<Vec<FolderEntry>>;

    /// Create `names[i]` under `parents[i]` in one call.
    async fn create_folders(&self, sid: &str, parents: &[String], names: &[String]) -> Result<()>;

    /// Rename `paths[i]` to `names[i]` in one call.
    async fn rename(&self, sid: &str, paths: &[String], names: &[String]) -> Result<()>;

    /// Delete `paths` recursively in one call.
    async fn delete(&self, sid: &str, paths: &[String]) -> Result<()>;

    /// Copy or move `paths[i]` to `destinations[i]` in one call.
    async fn copy_move(
        &self,
        sid: &str,
        paths: &[String],
        destinations: &[String],
        remove_source: bool,
    ) -> Result<()>;
}
