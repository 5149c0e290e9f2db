//! Request-level entry point: address resolution plus one reconciler per call.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use crate::api::{ApiClient, Credentials};
use crate::config::Config;
use crate::error::Result;
use crate::fs::{FolderEntry, OperationResponse, Reconciler, SharedFolder};
use crate::http::HttpClient;
use crate::session::with_session;
use crate::station::FileStation;
use crate::validate::PathInput;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDirectoryRequest {
    pub ip_address: String,
    pub shared_folder: PathInput,
    pub target_folder: PathInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteDirectoryRequest {
    pub ip_address: String,
    pub target_folder: PathInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveDirectoryRequest {
    pub ip_address: String,
    pub target_folder: PathInput,
    pub dest_folder_path: PathInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameDirectoryRequest {
    pub ip_address: String,
    pub target_folder: PathInput,
    pub changed_name_into: PathInput,
}

/// Builds the FileStation for a resolved NAS host.
pub trait Connector: Send + Sync {
    fn connect(&self, host: &str, port: u16) -> Result<Arc<dyn FileStation>>;
}

/// Connects over HTTP with the configured account, scheme and timeout.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: HttpClient,
    scheme: String,
    credentials: Credentials,
}

impl HttpConnector {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = match &config.proxy {
            Some(proxy) => HttpClient::with_proxy(proxy)?,
            None => HttpClient::new(),
        };
        Ok(Self {
            http: http.with_timeout(config.request_timeout()),
            scheme: config.scheme.clone(),
            credentials: config.credentials()?,
        })
    }
}

impl Connector for HttpConnector {
    fn connect(&self, host: &str, port: u16) -> Result<Arc<dyn FileStation>> {
        Ok(Arc::new(ApiClient::with_http(
            self.http.clone(),
            &self.scheme,
            host,
            port,
            self.credentials.clone(),
        )))
    }
}

/// Directory management for every NAS in the address book.
///
/// Each call resolves `ip_address`, validates the payload, and runs in its
/// own session. Nothing is shared between calls except configuration.
pub struct DirectoryManager {
    config: Config,
    connector: Arc<dyn Connector>,
}

impl DirectoryManager {
    /// Create a manager talking HTTP to the configured hosts.
    pub fn new(config: Config) -> Result<Self> {
        let connector = HttpConnector::from_config(&config)?;
        Ok(Self::with_connector(config, Arc::new(connector)))
    }

    pub fn with_connector(config: Config, connector: Arc<dyn Connector>) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn station(&self, ip_address: &str) -> Result<Arc<dyn FileStation>> {
        let port = self.config.resolve_port(ip_address)?;
        debug!(host = %ip_address, port, "resolved NAS address");
        self.connector.connect(ip_address, port)
    }

    fn reconciler(&self, ip_address: &str) -> Result<Reconciler> {
        Ok(Reconciler::new(self.station(ip_address)?).with_concurrency(self.config.concurrency()))
    }

    pub async fn create(&self, request: &CreateDirectoryRequest) -> Result<OperationResponse> {
        info!(host = %request.ip_address, target = %request.target_folder, "create directory");
        self.reconciler(&request.ip_address)?
            .create(&request.shared_folder, &request.target_folder)
            .await
    }

    pub async fn delete(&self, request: &DeleteDirectoryRequest) -> Result<OperationResponse> {
        info!(host = %request.ip_address, target = %request.target_folder, "delete directory");
        self.reconciler(&request.ip_address)?
            .delete(&request.target_folder)
            .await
    }

    pub async fn move_directory(
        &self,
        request: &MoveDirectoryRequest,
    ) -> Result<OperationResponse> {
        info!(
            host = %request.ip_address,
            target = %request.target_folder,
            dest = %request.dest_folder_path,
            "move directory"
        );
        self.reconciler(&request.ip_address)?
            .move_directory(&request.target_folder, &request.dest_folder_path)
            .await
    }

    pub async fn rename(&self, request: &RenameDirectoryRequest) -> Result<OperationResponse> {
        info!(
            host = %request.ip_address,
            target = %request.target_folder,
            name = %request.changed_name_into,
            "rename directory"
        );
        self.reconciler(&request.ip_address)?
            .rename(&request.target_folder, &request.changed_name_into)
            .await
    }

    /// Shared folders visible to the configured account.
    pub async fn list_shares(&self, ip_address: &str) -> Result<Vec<SharedFolder>> {
        let station = self.station(ip_address)?;
        with_session(station, |session| async move { session.list_shares().await }).await
    }

    /// Direct children of `folder_path`.
    pub async fn list_folder(
        &self,
        ip_address: &str,
        folder_path: &str,
    ) -> Result<Vec<FolderEntry>> {
        let station = self.station(ip_address)?;
        let folder_path = folder_path.to_string();
        with_session(station, |session| async move {
            session.list_folder(&folder_path).await
        })
        .await
    }
}
