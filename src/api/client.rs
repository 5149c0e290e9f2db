//! Synology web API client with request/response handling.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::auth_error_description;
use crate::error::{NasError, Result};
use crate::fs::{FolderEntry, SharedFolder};
use crate::http::HttpClient;
use crate::station::FileStation;

const AUTH_CGI: &str = "auth.cgi";
const ENTRY_CGI: &str = "entry.cgi";
const SESSION_NAME: &str = "FileStation";

/// Account used to authenticate against the NAS.
#[derive(Clone)]
pub struct Credentials {
    pub account: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One web API call: `api`, `version`, `method` plus extra parameters.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub api: &'static str,
    pub version: u8,
    pub method: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(api: &'static str, version: u8, method: &'static str) -> Self {
        Self {
            api,
            version,
            method,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Add a parameter encoded as a JSON array of strings.
    pub fn json_list(self, key: &'static str, values: &[String]) -> Result<Self> {
        let encoded = serde_json::to_string(values)?;
        Ok(self.param(key, encoded))
    }

    fn cgi(&self) -> &'static str {
        if self.api == "SYNO.API.Auth" {
            AUTH_CGI
        } else {
            ENTRY_CGI
        }
    }

    fn query(&self, sid: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("api", self.api.to_string()),
            ("version", self.version.to_string()),
            ("method", self.method.to_string()),
        ];
        query.extend(self.params.iter().cloned());
        if let Some(sid) = sid {
            query.push(("_sid", sid.to_string()));
        }
        query
    }
}

/// Response envelope shared by every web API endpoint.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl Envelope {
    fn into_result(self, api: &str) -> Result<Value> {
        if self.success {
            return Ok(self.data.unwrap_or(Value::Null));
        }

        let detail = self.error.unwrap_or(Value::Null);
        let code = detail
            .get("code")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                NasError::InvalidResponse(format!("{} failed without error code", api))
            })?;

        if api == "SYNO.API.Auth" {
            return Err(NasError::Api {
                code,
                message: auth_error_description(code).to_string(),
                detail,
            });
        }
        Err(NasError::api(code, detail))
    }
}

/// Parse a raw response body into the envelope's `data`.
pub(crate) fn parse_response(api: &str, body: &str) -> Result<Value> {
    let envelope: Envelope = serde_json::from_str(body)?;
    envelope.into_result(api)
}

/// Synology FileStation API client for one NAS host.
#[derive(Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    host: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a client for `http://{host}:{port}/webapi`.
    pub fn new(host: &str, port: u16, credentials: Credentials) -> Self {
        Self::with_http(HttpClient::new(), "http", host, port, credentials)
    }

    /// Create a client over a preconfigured [`HttpClient`].
    pub fn with_http(
        http: HttpClient,
        scheme: &str,
        host: &str,
        port: u16,
        credentials: Credentials,
    ) -> Self {
        Self {
            http,
            base_url: format!("{}://{}:{}/webapi", scheme, host, port),
            host: host.to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a web API request.
    ///
    /// No retries: each call is attempted once.
    pub async fn request(&self, request: ApiRequest, sid: Option<&str>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, request.cgi());
        debug!(
            api = request.api,
            method = request.method,
            host = %self.host,
            "web api request"
        );

        let body = self.http.get(&url, &request.query(sid)).await?;
        let result = parse_response(request.api, &body);
        if let Err(err) = &result {
            debug!(api = request.api, method = request.method, error = %err, "web api error");
        }
        result
    }
}

#[async_trait]
impl FileStation for ApiClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn login(&self) -> Result<String> {
        info!(host = %self.host, "performing login on NAS");
        let request = ApiRequest::new("SYNO.API.Auth", 3, "login")
            .param("account", self.credentials.account.clone())
            .param("passwd", self.credentials.password.clone())
            .param("session", SESSION_NAME)
            .param("format", "cookie");

        let data = self.request(request, None).await?;
        data.get("sid")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| NasError::InvalidResponse("login response without sid".to_string()))
    }

    async fn logout(&self, sid: &str) -> Result<()> {
        info!(host = %self.host, "performing logout on NAS");
        let request = ApiRequest::new("SYNO.API.Auth", 1, "logout").param("session", SESSION_NAME);
        self.request(request, Some(sid)).await?;
        Ok(())
    }

    async fn list_shares(&self, sid: &str) -> Result<Vec<SharedFolder>> {
        let request = ApiRequest::new("SYNO.FileStation.List", 2, "list_share");
        let data = self.request(request, Some(sid)).await?;
        let shares = data
            .get("shares")
            .cloned()
            .ok_or_else(|| NasError::InvalidResponse("list_share without shares".to_string()))?;
        Ok(serde_json::from_value(shares)?)
    }

    async fn list_folder(&self, sid: &str, folder_path: &str) -> Result<Vec<FolderEntry>> {
        let request =
            ApiRequest::new("SYNO.FileStation.List", 2, "list").param("folder_path", folder_path);
        let data = self.request(request, Some(sid)).await?;
        match data.get("files") {
            Some(files) => Ok(serde_json::from_value(files.clone())?),
            None => Ok(Vec::new()),
        }
    }

    async fn create_folders(&self, sid: &str, parents: &[String], names: &[String]) -> Result<()> {
        info!(count = names.len(), host = %self.host, "creating directories");
        let request = ApiRequest::new("SYNO.FileStation.CreateFolder", 2, "create")
            .json_list("folder_path", parents)?
            .json_list("name", names)?
            .param("force_parent", "true");
        self.request(request, Some(sid)).await?;
        Ok(())
    }

    async fn rename(&self, sid: &str, paths: &[String], names: &[String]) -> Result<()> {
        info!(count = paths.len(), host = %self.host, "renaming directories");
        let request = ApiRequest::new("SYNO.FileStation.Rename", 2, "rename")
            .json_list("path", paths)?
            .json_list("name", names)?;
        self.request(request, Some(sid)).await?;
        Ok(())
    }

    async fn delete(&self, sid: &str, paths: &[String]) -> Result<()> {
        info!(count = paths.len(), host = %self.host, "deleting directories");
        let request = ApiRequest::new("SYNO.FileStation.Delete", 2, "start")
            .json_list("path", paths)?
            .param("recursive", "true");
        let data = self.request(request, Some(sid)).await?;
        log_task_id("delete", &data);
        Ok(())
    }

    async fn copy_move(
        &self,
        sid: &str,
        paths: &[String],
        destinations: &[String],
        remove_source: bool,
    ) -> Result<()> {
        info!(count = paths.len(), remove_source, host = %self.host, "moving directories");
        let request = ApiRequest::new("SYNO.FileStation.CopyMove", 3, "start")
            .json_list("path", paths)?
            .json_list("dest_folder_path", destinations)?
            .param("remove_src", remove_source.to_string());
        let data = self.request(request, Some(sid)).await?;
        log_task_id("copy_move", &data);
        Ok(())
    }
}

// Delete and CopyMove run as background tasks on the NAS.
fn log_task_id(operation: &str, data: &Value) {
    match data.get("taskid").and_then(Value::as_str) {
        Some(task_id) => info!(operation, task_id, "background task started"),
        None => warn!(operation, "background task started without task id"),
    }
}
