//! In-memory FileStation for testing.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use super::FileStation;
use crate::error::{NasError, Result};
use crate::fs::{FolderEntry, SharedFolder};
use crate::path::{normalize_path, sibling_path};

/// A call the mock received, in order of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Login,
    Logout { sid: String },
    ListShares,
    ListFolder { path: String },
    CreateFolders {
        parents: Vec<String>,
        names: Vec<String>,
    },
    Rename {
        paths: Vec<String>,
        names: Vec<String>,
    },
    Delete {
        paths: Vec<String>,
    },
    CopyMove {
        paths: Vec<String>,
        destinations: Vec<String>,
        remove_source: bool,
    },
}

impl MockCall {
    /// True for calls that change remote state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            MockCall::CreateFolders { .. }
                | MockCall::Rename { .. }
                | MockCall::Delete { .. }
                | MockCall::CopyMove { .. }
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Api(i64),
    Http(u16),
    Timeout,
}

impl Failure {
    fn to_error(self) -> NasError {
        match self {
            Failure::Api(code) => NasError::api(code, json!({ "code": code })),
            Failure::Http(status) => NasError::HttpError(status),
            Failure::Timeout => NasError::Timeout(Duration::from_secs(20)),
        }
    }
}

#[derive(Default)]
struct State {
    folders: BTreeSet<String>,
    sessions: HashSet<String>,
    next_sid: u64,
    logins: usize,
    logouts: usize,
    calls: Vec<MockCall>,
    login_failure: Option<Failure>,
    logout_failure: Option<Failure>,
    mutation_failure: Option<Failure>,
    list_failures: HashMap<String, Failure>,
}

impl State {
    fn insert_with_ancestors(&mut self, path: &str) {
        let path = normalize_path(path);
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current.push('/');
            current.push_str(segment);
            self.folders.insert(current.clone());
        }
    }

    fn subtree(&self, root: &str) -> Vec<String> {
        let prefix = format!("{}/", root);
        self.folders
            .iter()
            .filter(|p| p.as_str() == root || p.starts_with(&prefix))
            .cloned()
            .collect()
    }

    fn relocate(&mut self, from: &str, to: &str, remove_source: bool) {
        for old in self.subtree(from) {
            let new = format!("{}{}", to, &old[from.len()..]);
            if remove_source {
                self.folders.remove(&old);
            }
            self.folders.insert(new);
        }
        self.insert_with_ancestors(to);
    }

    fn check_sid(&self, sid: &str) -> Result<()> {
        if self.sessions.contains(sid) {
            Ok(())
        } else {
            Err(Failure::Api(119).to_error())
        }
    }

    fn begin_mutation(&mut self, sid: &str, call: MockCall) -> Result<()> {
        self.calls.push(call);
        self.check_sid(sid)?;
        match self.mutation_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

/// In-memory FileStation for testing.
///
/// The remote tree is a set of absolute folder paths; single-segment paths
/// are reported as shared folders. Every call is recorded so tests can
/// assert on what reached the "wire", and failures can be injected per
/// endpoint.
///
/// # Examples
///
/// ```
/// use nasdir::station::{FileStation, MockFileStation};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> nasdir::Result<()> {
/// let station = MockFileStation::with_folders(["/photos/2024"]);
/// let sid = station.login().await?;
/// assert_eq!(station.list_folder(&sid, "/photos").await?.len(), 1);
/// station.logout(&sid).await?;
/// # Ok(())
/// # }
/// ```
pub struct MockFileStation {
    host: String,
    state: Mutex<State>,
}

impl MockFileStation {
    /// Create a mock pre-populated with folders. Ancestors are added implicitly.
    pub fn with_folders(folders: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let mut state = State::default();
        for folder in folders {
            state.insert_with_ancestors(folder.as_ref());
        }
        Self {
            host: "mock".to_string(),
            state: Mutex::new(state),
        }
    }

    /// Make `login` fail with a remote error code.
    pub fn fail_login(mut self, code: i64) -> Self {
        self.state.get_mut().login_failure = Some(Failure::Api(code));
        self
    }

    /// Make `logout` fail with a transport error.
    pub fn fail_logout(mut self) -> Self {
        self.state.get_mut().logout_failure = Some(Failure::Http(502));
        self
    }

    /// Make every mutating call fail with a remote error code.
    pub fn fail_mutations(mut self, code: i64) -> Self {
        self.state.get_mut().mutation_failure = Some(Failure::Api(code));
        self
    }

    /// Make listing `path` fail with a remote error code.
    pub fn fail_list_with_code(mut self, path: &str, code: i64) -> Self {
        self.state
            .get_mut()
            .list_failures
            .insert(normalize_path(path), Failure::Api(code));
        self
    }

    /// Make listing `path` time out.
    pub fn fail_list_with_timeout(mut self, path: &str) -> Self {
        self.state
            .get_mut()
            .list_failures
            .insert(normalize_path(path), Failure::Timeout);
        self
    }

    /// Make listing `path` answer with a non-2xx HTTP status.
    pub fn fail_list_with_status(mut self, path: &str, status: u16) -> Self {
        self.state
            .get_mut()
            .list_failures
            .insert(normalize_path(path), Failure::Http(status));
        self
    }

    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn mutations(&self) -> Vec<MockCall> {
        self.calls().await.into_iter().filter(MockCall::is_mutation).collect()
    }

    pub async fn logins(&self) -> usize {
        self.state.lock().await.logins
    }

    pub async fn logouts(&self) -> usize {
        self.state.lock().await.logouts
    }

    /// Sessions issued and not yet logged out.
    pub async fn open_sessions(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    pub async fn exists(&self, path: &str) -> bool {
        self.state.lock().await.folders.contains(&normalize_path(path))
    }
}

impl Default for MockFileStation {
    fn default() -> Self {
        let folders: [&str; 0] = [];
        Self::with_folders(folders)
    }
}

#[async_trait]
impl FileStation for MockFileStation {
    fn host(&self) -> &str {
        &self.host
    }

    async fn login(&self) -> Result<String> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::Login);
        if let Some(failure) = state.login_failure {
            return Err(failure.to_error());
        }
        state.logins += 1;
        state.next_sid += 1;
        let sid = format!("sid-{}", state.next_sid);
        state.sessions.insert(sid.clone());
        Ok(sid)
    }

    async fn logout(&self, sid: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::Logout {
            sid: sid.to_string(),
        });
        state.logouts += 1;
        state.sessions.remove(sid);
        match state.logout_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    async fn list_shares(&self, sid: &str) -> Result<Vec<SharedFolder>> {
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::ListShares);
        state.check_sid(sid)?;
        Ok(state
            .folders
            .iter()
            .filter(|p| p.matches('/').count() == 1)
            .map(|p| SharedFolder {
                name: p[1..].to_string(),
                path: p.clone(),
            })
            .collect())
    }

    async fn list_folder(&self, sid: &str, folder_path: &str) -> Result<Vec<FolderEntry>> {
        let path = normalize_path(folder_path);
        // Let concurrently issued checks interleave.
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        state.calls.push(MockCall::ListFolder { path: path.clone() });
        state.check_sid(sid)?;
        if let Some(failure) = state.list_failures.get(&path) {
            return Err(failure.to_error());
        }
        if !state.folders.contains(&path) {
            return Err(Failure::Api(408).to_error());
        }
        let prefix = format!("{}/", path);
        Ok(state
            .folders
            .iter()
            .filter_map(|p| {
                let rest = p.strip_prefix(&prefix)?;
                (!rest.contains('/')).then(|| FolderEntry {
                    name: rest.to_string(),
                    path: p.clone(),
                    isdir: true,
                })
            })
            .collect())
    }

    async fn create_folders(&self, sid: &str, parents: &[String], names: &[String]) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin_mutation(
            sid,
            MockCall::CreateFolders {
                parents: parents.to_vec(),
                names: names.to_vec(),
            },
        )?;
        for (parent, name) in parents.iter().zip(names) {
            state.insert_with_ancestors(&format!("{}/{}", parent, name));
        }
        Ok(())
    }

    async fn rename(&self, sid: &str, paths: &[String], names: &[String]) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin_mutation(
            sid,
            MockCall::Rename {
                paths: paths.to_vec(),
                names: names.to_vec(),
            },
        )?;
        for (path, name) in paths.iter().zip(names) {
            let from = normalize_path(path);
            let to = sibling_path(&from, name);
            state.relocate(&from, &to, true);
        }
        Ok(())
    }

    async fn delete(&self, sid: &str, paths: &[String]) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin_mutation(
            sid,
            MockCall::Delete {
                paths: paths.to_vec(),
            },
        )?;
        for path in paths {
            for doomed in state.subtree(&normalize_path(path)) {
                state.folders.remove(&doomed);
            }
        }
        Ok(())
    }

    async fn copy_move(
        &self,
        sid: &str,
        paths: &[String],
        destinations: &[String],
        remove_source: bool,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin_mutation(
            sid,
            MockCall::CopyMove {
                paths: paths.to_vec(),
                destinations: destinations.to_vec(),
                remove_source,
            },
        )?;
        for (path, dest) in paths.iter().zip(destinations) {
            state.relocate(&normalize_path(path), &normalize_path(dest), remove_source);
        }
        Ok(())
    }
}
