//! Workspace connection settings
//!
//! Host and token come from `DATABRICKS_HOST` and `DATABRICKS_TOKEN`.
//! Both are required and are checked before any network activity.

use thiserror::Error;

pub const HOST_VAR: &str = "DATABRICKS_HOST";
pub const TOKEN_VAR: &str = "DATABRICKS_TOKEN";

/// Missing or unusable credentials
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
}

/// Host URL and bearer token for one workspace
#[derive(Clone)]
pub struct WorkspaceConfig {
    host: String,
    token: String,
}

impl std::fmt::Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WorkspaceConfig {
    /// Build from explicit values, normalising the host
    pub fn new(host: &str, token: &str) -> Result<Self, ConfigError> {
        let host = host.trim();
        let token = token.trim();
        if host.is_empty() {
            return Err(ConfigError::MissingVar(HOST_VAR));
        }
        if token.is_empty() {
            return Err(ConfigError::MissingVar(TOKEN_VAR));
        }

        Ok(Self {
            host: normalize_host(host),
            token: token.to_string(),
        })
    }

    /// Read from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(HOST_VAR).unwrap_or_default();
        let token = lookup(TOKEN_VAR).unwrap_or_default();
        Self::new(&host, &token)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
