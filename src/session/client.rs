//! Session lifecycle against the NAS.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::error::{NasError, Result};
use crate::fs::{FolderEntry, SharedFolder};
use crate::station::FileStation;

/// Lifecycle state of a [`SessionClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
    Closed,
}

/// An authenticated session: a station plus the sid it issued.
///
/// Handed to operations by [`with_session`](super::with_session). Cloning is
/// cheap. Once the owning [`SessionClient`] logs out or is dropped, every
/// clone refuses to send its sid.
#[derive(Clone)]
pub struct Session {
    station: Arc<dyn FileStation>,
    sid: Arc<str>,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.station.host())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn host(&self) -> &str {
        self.station.host()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn sid(&self) -> Result<&str> {
        if self.is_closed() {
            return Err(NasError::Custom("session is already logged out".to_string()));
        }
        Ok(&self.sid)
    }

    pub async fn list_shares(&self) -> Result<Vec<SharedFolder>> {
        self.station.list_shares(self.sid()?).await
    }

    pub async fn list_folder(&self, folder_path: &str) -> Result<Vec<FolderEntry>> {
        self.station.list_folder(self.sid()?, folder_path).await
    }

    pub async fn create_folders(&self, parents: &[String], names: &[String]) -> Result<()> {
        self.station.create_folders(self.sid()?, parents, names).await
    }

    pub async fn rename(&self, paths: &[String], names: &[String]) -> Result<()> {
        self.station.rename(self.sid()?, paths, names).await
    }

    pub async fn delete(&self, paths: &[String]) -> Result<()> {
        self.station.delete(self.sid()?, paths).await
    }

    pub async fn move_to(&self, paths: &[String], destinations: &[String]) -> Result<()> {
        self.station
            .copy_move(self.sid()?, paths, destinations, true)
            .await
    }
}

/// Owns one login/logout cycle.
///
/// `Unauthenticated -> Authenticated -> Closed`. `Closed` is terminal and
/// reachable from either earlier state. Logout is sent at most once. If the
/// client is dropped while still authenticated (a cancelled or panicking
/// operation), a best-effort logout is spawned on the current tokio runtime.
pub struct SessionClient {
    station: Arc<dyn FileStation>,
    state: SessionState,
    sid: Option<Arc<str>>,
    closed: Arc<AtomicBool>,
}

impl SessionClient {
    pub fn new(station: Arc<dyn FileStation>) -> Self {
        Self {
            station,
            state: SessionState::Unauthenticated,
            sid: None,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Authenticate and return the session.
    pub async fn login(&mut self) -> Result<Session> {
        if self.state != SessionState::Unauthenticated {
            return Err(NasError::Custom(format!(
                "cannot log in from state {:?}",
                self.state
            )));
        }

        let sid: Arc<str> = self.station.login().await?.into();
        debug!(host = %self.station.host(), "session opened");
        self.sid = Some(sid.clone());
        self.state = SessionState::Authenticated;
        Ok(Session {
            station: self.station.clone(),
            sid,
            closed: self.closed.clone(),
        })
    }

    /// Release the session. Only the first call reaches the NAS.
    pub async fn logout(&mut self) -> Result<()> {
        self.state = SessionState::Closed;
        self.closed.store(true, Ordering::Release);
        match self.sid.take() {
            Some(sid) => self.station.logout(&sid).await,
            None => Ok(()),
        }
    }
}

impl Drop for SessionClient {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Release);
        let Some(sid) = self.sid.take() else {
            return;
        };
        warn!(host = %self.station.host(), "session dropped without logout");
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no runtime available, session left to expire on the NAS");
            return;
        };
        let station = self.station.clone();
        handle.spawn(async move {
            if let Err(e) = station.logout(&sid).await {
                warn!(error = %e, "deferred logout failed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{MockCall, MockFileStation};

    #[tokio::test]
    async fn test_state_transitions() {
        let station = Arc::new(MockFileStation::with_folders(["/share"]));
        let mut client = SessionClient::new(station.clone());
        assert_eq!(client.state(), &SessionState::Unauthenticated);

        let session = client.login().await.unwrap();
        assert_eq!(client.state(), &SessionState::Authenticated);
        assert!(session.list_folder("/share").await.is_ok());

        client.logout().await.unwrap();
        assert_eq!(client.state(), &SessionState::Closed);
        assert_eq!(station.logouts().await, 1);
    }

    #[tokio::test]
    async fn test_cloned_session_is_revoked_by_logout() {
        let station = Arc::new(MockFileStation::with_folders(["/share"]));
        let mut client = SessionClient::new(station.clone());
        let session = client.login().await.unwrap();
        let kept = session.clone();

        client.logout().await.unwrap();
        assert!(kept.is_closed());
        let err = kept.list_folder("/share").await.unwrap_err();
        assert!(matches!(err, NasError::Custom(_)));
        assert!(
            !station
                .calls()
                .await
                .iter()
                .any(|call| matches!(call, MockCall::ListFolder { .. }))
        );
    }

    #[tokio::test]
    async fn test_dropped_client_revokes_session() {
        let station = Arc::new(MockFileStation::default());
        let mut client = SessionClient::new(station.clone());
        let session = client.login().await.unwrap();
        drop(client);
        assert!(session.is_closed());
        assert!(session.delete(&["/share".to_string()]).await.is_err());
        assert!(station.mutations().await.is_empty());
    }

    #[tokio::test]
    async fn test_logout_is_sent_once() {
        let station = Arc::new(MockFileStation::default());
        let mut client = SessionClient::new(station.clone());
        client.login().await.unwrap();
        client.logout().await.unwrap();
        client.logout().await.unwrap();
        drop(client);
        tokio::task::yield_now().await;
        assert_eq!(station.logouts().await, 1);
    }

    #[tokio::test]
    async fn test_closed_client_cannot_log_in_again() {
        let station = Arc::new(MockFileStation::default());
        let mut client = SessionClient::new(station.clone());
        client.logout().await.unwrap();
        assert_eq!(client.state(), &SessionState::Closed);
        assert!(client.login().await.is_err());
        assert_eq!(station.logins().await, 0);
        assert_eq!(station.logouts().await, 0);
    }

    #[tokio::test]
    async fn test_login_failure_carries_remote_code() {
        let station = Arc::new(MockFileStation::default().fail_login(400));
        let mut client = SessionClient::new(station.clone());
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, NasError::Api { code: 400, .. }));
        assert_eq!(client.state(), &SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_drop_while_authenticated_spawns_logout() {
        let station = Arc::new(MockFileStation::default());
        {
            let mut client = SessionClient::new(station.clone());
            client.login().await.unwrap();
        }
        // Let the spawned logout run.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(station.logouts().await, 1);
        assert_eq!(station.open_sessions().await, 0);
        assert!(matches!(station.calls().await.last(), Some(MockCall::Logout { .. })));
    }
}
