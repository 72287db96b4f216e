//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use reqwest::StatusCode;
use tempfile::TempDir;

use compute_lister::core::{ClusterRecord, PolicyLookup, Workspace, WorkspaceError};

/// Helper to get a compute-lister command with no workspace credentials
pub fn lister() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("compute-lister"));
    cmd.env_remove("DATABRICKS_HOST")
        .env_remove("DATABRICKS_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// Path of the built binary, for tests that need a raw child process
pub fn lister_path() -> &'static str {
    env!("CARGO_BIN_EXE_compute-lister")
}

/// Run blocking client code (reqwest blocking, assert_cmd) off the async runtime
pub async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

/// Helper to write an identifier list into a fresh temp directory
pub fn setup_input(content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("clusters.txt");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

/// Helper to turn string literals into owned identifiers
pub fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// In-memory workspace that records every policy lookup
#[derive(Default)]
pub struct FakeWorkspace {
    pub clusters: Vec<ClusterRecord>,
    pub policies: HashMap<String, String>,
    pub fail_listing: bool,
    pub policy_calls: RefCell<Vec<String>>,
}

impl FakeWorkspace {
    pub fn new(clusters: Vec<ClusterRecord>) -> Self {
        Self {
            clusters,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, policy_id: &str, name: &str) -> Self {
        self.policies.insert(policy_id.to_string(), name.to_string());
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_listing: true,
            ..Default::default()
        }
    }

    pub fn policy_call_count(&self) -> usize {
        self.policy_calls.borrow().len()
    }
}

impl Workspace for FakeWorkspace {
    fn list_clusters(&self) -> Result<Vec<ClusterRecord>, WorkspaceError> {
        if self.fail_listing {
            return Err(WorkspaceError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: "invalid token".to_string(),
            });
        }
        Ok(self.clusters.clone())
    }
}

impl PolicyLookup for FakeWorkspace {
    fn policy_name(&self, policy_id: &str) -> Result<Option<String>, WorkspaceError> {
        self.policy_calls.borrow_mut().push(policy_id.to_string());
        match self.policies.get(policy_id) {
            Some(name) => Ok(Some(name.clone())),
            None => Err(WorkspaceError::Status {
                status: StatusCode::NOT_FOUND,
                body: format!("policy {} does not exist", policy_id),
            }),
        }
    }
}
