//! Configuration loading.
//!
//! A TOML file provides the address book, timeouts and defaults. The account
//! may live in the file or come from the environment:
//! - `NASDIR_CONFIG`: path of the TOML file
//! - `NAS_USERNAME` / `NAS_PASSWORD`: account, overriding the file

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::api::Credentials;
use crate::error::{NasError, Result};
use crate::fs::existence::DEFAULT_CONCURRENCY;
use crate::http::DEFAULT_TIMEOUT;

pub const CONFIG_PATH_ENV: &str = "NASDIR_CONFIG";
pub const USERNAME_ENV: &str = "NAS_USERNAME";
pub const PASSWORD_ENV: &str = "NAS_PASSWORD";

const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub username: String,
    pub password: String,
    /// `http` or `https`.
    pub scheme: String,
    /// Port used for address book entries that do not name one.
    pub default_port: u16,
    /// NAS hosts this process may talk to, `ip -> port`. A port of `0`
    /// stands for `default_port`.
    pub address_book: BTreeMap<String, u16>,
    pub request_timeout_secs: u64,
    pub max_concurrent_checks: usize,
    pub proxy: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("default_port", &self.default_port)
            .field("address_book", &self.address_book)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_checks", &self.max_concurrent_checks)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            scheme: "http".to_string(),
            default_port: DEFAULT_PORT,
            address_book: BTreeMap::new(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_concurrent_checks: DEFAULT_CONCURRENCY,
            proxy: None,
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| NasError::Config(format!("Invalid config: {}", e)))
    }

    /// Load from TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NasError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the file named by `NASDIR_CONFIG` (or `explicit`, which wins)
    /// and apply the account overrides from the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os(CONFIG_PATH_ENV);
        let path = explicit.or_else(|| from_env.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                Self::from_toml_file(path)?
            }
            None => {
                debug!("no configuration file given, using defaults");
                Self::default()
            }
        };
        config.apply_account_overrides(env::var(USERNAME_ENV).ok(), env::var(PASSWORD_ENV).ok());
        Ok(config)
    }

    /// Replace the account with non-empty override values.
    pub fn apply_account_overrides(&mut self, username: Option<String>, password: Option<String>) {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            self.username = username;
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            self.password = password;
        }
    }

    /// Account for logging in. Both parts must be set.
    pub fn credentials(&self) -> Result<Credentials> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(NasError::Config(format!(
                "NAS account is not configured, set {} and {}",
                USERNAME_ENV, PASSWORD_ENV
            )));
        }
        Ok(Credentials {
            account: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Port for `ip_address`, which must be listed in the address book.
    pub fn resolve_port(&self, ip_address: &str) -> Result<u16> {
        match self.address_book.get(ip_address) {
            Some(0) => Ok(self.default_port),
            Some(port) => Ok(*port),
            None => Err(NasError::validation(
                "ip_address",
                format!("{} is not a known NAS address.", ip_address),
            )),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn concurrency(&self) -> usize {
        self.max_concurrent_checks.max(1)
    }
}
