//! Cluster records
//!
//! [`ApiCluster`] mirrors the JSON returned by the clusters API; every field is
//! optional because the service omits whatever is unset. [`ClusterRecord`] is
//! the typed record the rest of the crate works with, built from the wire form
//! through `From`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of `GET /api/2.1/clusters/list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiCluster {
    pub cluster_id: Option<String>,
    pub cluster_name: Option<String>,
    pub state: Option<String>,
    pub policy_id: Option<String>,
    pub cluster_source: Option<String>,
    pub creator_user_name: Option<String>,
    /// Epoch milliseconds
    pub start_time: Option<i64>,
    /// Epoch milliseconds
    pub terminated_time: Option<i64>,
    pub num_workers: Option<u32>,
    pub node_type_id: Option<String>,
    pub driver_node_type_id: Option<String>,
    pub spark_version: Option<String>,
    pub autotermination_minutes: Option<u32>,
}

/// A compute cluster as seen in one workspace snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterRecord {
    pub cluster_id: Option<String>,
    pub cluster_name: Option<String>,
    pub state: Option<String>,
    pub policy_id: Option<String>,
    pub cluster_source: Option<String>,
    pub creator_user_name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub terminated_time: Option<DateTime<Utc>>,
    pub num_workers: Option<u32>,
    pub node_type_id: Option<String>,
    pub driver_node_type_id: Option<String>,
    pub spark_version: Option<String>,
    pub autotermination_minutes: Option<u32>,
}

impl ClusterRecord {
    /// Create a record with just an id and a name
    pub fn new(cluster_id: impl Into<String>, cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_id: Some(cluster_id.into()),
            cluster_name: Some(cluster_name.into()),
            ..Default::default()
        }
    }

    /// Attach a policy id
    pub fn with_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = Some(policy_id.into());
        self
    }

    /// Set the lifecycle state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.cluster_name
            .as_deref()
            .or(self.cluster_id.as_deref())
            .unwrap_or("")
    }
}

impl From<ApiCluster> for ClusterRecord {
    fn from(api: ApiCluster) -> Self {
        Self {
            cluster_id: non_empty(api.cluster_id),
            cluster_name: non_empty(api.cluster_name),
            state: non_empty(api.state),
            policy_id: non_empty(api.policy_id),
            cluster_source: non_empty(api.cluster_source),
            creator_user_name: non_empty(api.creator_user_name),
            start_time: api.start_time.and_then(from_epoch_millis),
            terminated_time: api.terminated_time.and_then(from_epoch_millis),
            num_workers: api.num_workers,
            node_type_id: non_empty(api.node_type_id),
            driver_node_type_id: non_empty(api.driver_node_type_id),
            spark_version: non_empty(api.spark_version),
            autotermination_minutes: api.autotermination_minutes,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// The API reports 0 for "never"
fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
}
