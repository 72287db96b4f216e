//! Workspace API access
//!
//! The pipeline talks to the workspace through two narrow traits:
//! [`Workspace`] enumerates clusters and [`PolicyLookup`] resolves a policy id
//! to its name. [`WorkspaceClient`] implements both over the REST API with a
//! blocking `reqwest` client; tests substitute in-memory fakes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::cluster::{ApiCluster, ClusterRecord};
use crate::core::config::WorkspaceConfig;

const CLUSTERS_LIST_PATH: &str = "/api/2.1/clusters/list";
const POLICY_GET_PATH: &str = "/api/2.0/policies/clusters/get";
const PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the workspace API
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Workspace returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkspaceError {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            WorkspaceError::Http(_) => "transport",
            WorkspaceError::Status { status, .. } => match *status {
                StatusCode::NOT_FOUND => "not_found",
                StatusCode::UNAUTHORIZED => "unauthenticated",
                StatusCode::FORBIDDEN => "permission_denied",
                _ => "status",
            },
            WorkspaceError::Decode { .. } => "decode",
        }
    }
}

/// Enumerates every cluster visible to the caller
pub trait Workspace {
    fn list_clusters(&self) -> Result<Vec<ClusterRecord>, WorkspaceError>;
}

/// Resolves a cluster policy id to its display name
pub trait PolicyLookup {
    fn policy_name(&self, policy_id: &str) -> Result<Option<String>, WorkspaceError>;
}

#[derive(Debug, Deserialize)]
struct ListClustersResponse {
    #[serde(default)]
    clusters: Vec<ApiCluster>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PolicyResponse {
    #[serde(default)]
    name: Option<String>,
}

/// How far the current cluster listing has got
///
/// Clones share state, so an interrupt handler can report partial progress
/// while the client is blocked on the network.
#[derive(Debug, Clone, Default)]
pub struct ListProgress {
    state: Arc<ProgressState>,
}

#[derive(Debug, Default)]
struct ProgressState {
    listing: AtomicBool,
    pages: AtomicUsize,
    clusters: AtomicUsize,
}

impl ListProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&self) {
        self.state.pages.store(0, Ordering::SeqCst);
        self.state.clusters.store(0, Ordering::SeqCst);
        self.state.listing.store(true, Ordering::SeqCst);
    }

    fn page(&self, clusters: usize) {
        self.state.pages.fetch_add(1, Ordering::SeqCst);
        self.state.clusters.fetch_add(clusters, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.state.listing.store(false, Ordering::SeqCst);
    }

    /// Whether a listing is in flight
    pub fn is_listing(&self) -> bool {
        self.state.listing.load(Ordering::SeqCst)
    }

    /// Pages received so far
    pub fn pages(&self) -> usize {
        self.state.pages.load(Ordering::SeqCst)
    }

    /// Clusters received so far
    pub fn clusters(&self) -> usize {
        self.state.clusters.load(Ordering::SeqCst)
    }
}

/// Blocking REST client for one workspace
pub struct WorkspaceClient {
    http: Client,
    host: String,
    token: String,
    progress: ListProgress,
}

impl WorkspaceClient {
    pub fn new(config: &WorkspaceConfig) -> Result<Self, WorkspaceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("compute-lister/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            host: config.host().to_string(),
            token: config.token().to_string(),
            progress: ListProgress::new(),
        })
    }

    /// Handle on the listing progress, shared with the client
    pub fn progress(&self) -> ListProgress {
        self.progress.clone()
    }

    fn fetch_all_pages(&self) -> Result<Vec<ClusterRecord>, WorkspaceError> {
        let page_size = PAGE_SIZE.to_string();
        let mut clusters = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("page_size", page_size.as_str())];
            if let Some(token) = page_token.as_deref() {
                query.push(("page_token", token));
            }

            let page: ListClustersResponse = self.get(CLUSTERS_LIST_PATH, &query)?;
            debug!(count = page.clusters.len(), "fetched cluster page");
            self.progress.page(page.clusters.len());
            clusters.extend(page.clusters.into_iter().map(ClusterRecord::from));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(clusters)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WorkspaceError> {
        let url = format!("{}{}", self.host, path);
        trace!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(WorkspaceError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|source| WorkspaceError::Decode {
            path: path.to_string(),
            source,
        })
    }
}

impl Workspace for WorkspaceClient {
    fn list_clusters(&self) -> Result<Vec<ClusterRecord>, WorkspaceError> {
        self.progress.start();
        let result = self.fetch_all_pages();
        self.progress.finish();
        result
    }
}

impl PolicyLookup for WorkspaceClient {
    fn policy_name(&self, policy_id: &str) -> Result<Option<String>, WorkspaceError> {
        let policy: PolicyResponse = self.get(POLICY_GET_PATH, &[("policy_id", policy_id)])?;
        Ok(policy.name.filter(|n| !n.is_empty()))
    }
}
