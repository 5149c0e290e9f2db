//! Scoped session acquisition.

use std::future::Future;
use std::sync::Arc;

use tracing::warn;

use super::client::{Session, SessionClient};
use crate::error::Result;
use crate::station::FileStation;

/// Log in, run `op`, and log out on every exit path.
///
/// The result of `op` is returned unchanged. A failed logout is logged and
/// never replaces it, whether `op` succeeded or failed. When login itself
/// fails no session exists and nothing is released.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use nasdir::api::{ApiClient, Credentials};
/// use nasdir::session::with_session;
///
/// # async fn example() -> nasdir::Result<()> {
/// let station = Arc::new(ApiClient::new(
///     "192.168.100.101",
///     5000,
///     Credentials { account: "admin".into(), password: "secret".into() },
/// ));
/// let shares = with_session(station, |session| async move {
///     session.list_shares().await
/// })
/// .await?;
/// println!("{} shares", shares.len());
/// # Ok(())
/// # }
/// ```
pub async fn with_session<T, F, Fut>(station: Arc<dyn FileStation>, op: F) -> Result<T>
where
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut client = SessionClient::new(station);
    let session = client.login().await?;

    let outcome = op(session).await;

    if let Err(e) = client.logout().await {
        match &outcome {
            Ok(_) => warn!(error = %e, "logout failed after successful operation"),
            Err(primary) => {
                warn!(error = %e, primary = %primary, "logout failed after failed operation")
            }
        }
    }

    outcome
}
