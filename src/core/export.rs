//! CSV export of resolved clusters

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::cluster::ClusterRecord;

/// Which columns end up in the CSV
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnSet {
    /// Cluster details: id, name, state, policy id, source, sizing, runtime
    #[default]
    Full,
    /// Name, policy id and resolved policy name
    Policy,
}

const FULL_COLUMNS: &[&str] = &[
    "cluster_id",
    "cluster_name",
    "state",
    "policy_id",
    "cluster_source",
    "creator_user_name",
    "start_time",
    "terminated_time",
    "num_workers",
    "node_type_id",
    "driver_node_type_id",
    "spark_version",
    "autotermination_minutes",
];

const POLICY_COLUMNS: &[&str] = &["cluster_name", "policy_id", "policy_name"];

impl ColumnSet {
    /// Header row, in output order
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            ColumnSet::Full => FULL_COLUMNS,
            ColumnSet::Policy => POLICY_COLUMNS,
        }
    }

    /// Whether rows need a policy name lookup
    pub fn needs_policy_names(self) -> bool {
        matches!(self, ColumnSet::Policy)
    }
}

impl fmt::Display for ColumnSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSet::Full => write!(f, "full"),
            ColumnSet::Policy => write!(f, "policy"),
        }
    }
}

/// Stringified projection of a cluster, ready to write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRow {
    pub cluster_id: String,
    pub cluster_name: String,
    pub state: String,
    pub policy_id: String,
    pub policy_name: String,
    pub cluster_source: String,
    pub creator_user_name: String,
    pub start_time: String,
    pub terminated_time: String,
    pub num_workers: String,
    pub node_type_id: String,
    pub driver_node_type_id: String,
    pub spark_version: String,
    pub autotermination_minutes: String,
}

impl ResolvedRow {
    pub fn from_record(record: &ClusterRecord, policy_name: Option<String>) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Self {
            cluster_id: text(&record.cluster_id),
            cluster_name: text(&record.cluster_name),
            state: text(&record.state),
            policy_id: text(&record.policy_id),
            policy_name: policy_name.unwrap_or_default(),
            cluster_source: text(&record.cluster_source),
            creator_user_name: text(&record.creator_user_name),
            start_time: format_time(record.start_time),
            terminated_time: format_time(record.terminated_time),
            // A fixed-size cluster with no workers reports nothing at all
            num_workers: record.num_workers.unwrap_or(0).to_string(),
            node_type_id: text(&record.node_type_id),
            driver_node_type_id: text(&record.driver_node_type_id),
            spark_version: text(&record.spark_version),
            // 0 means auto-termination is disabled
            autotermination_minutes: record
                .autotermination_minutes
                .filter(|m| *m > 0)
                .map(|m| m.to_string())
                .unwrap_or_default(),
        }
    }

    /// Field values in the order of `columns.headers()`
    pub fn values(&self, columns: ColumnSet) -> Vec<&str> {
        columns
            .headers()
            .iter()
            .map(|header| self.field(header))
            .collect()
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "cluster_id" => &self.cluster_id,
            "cluster_name" => &self.cluster_name,
            "state" => &self.state,
            "policy_id" => &self.policy_id,
            "policy_name" => &self.policy_name,
            "cluster_source" => &self.cluster_source,
            "creator_user_name" => &self.creator_user_name,
            "start_time" => &self.start_time,
            "terminated_time" => &self.terminated_time,
            "num_workers" => &self.num_workers,
            "node_type_id" => &self.node_type_id,
            "driver_node_type_id" => &self.driver_node_type_id,
            "spark_version" => &self.spark_version,
            "autotermination_minutes" => &self.autotermination_minutes,
            _ => "",
        }
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, false))
        .unwrap_or_default()
}

/// Errors while writing the CSV file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write CSV to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the export did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to write; the destination was left untouched
    Skipped,
    /// Number of data rows written
    Written(usize),
}

/// Write rows to `path`, replacing any existing file
pub fn export_csv(
    rows: &[ResolvedRow],
    path: &Path,
    columns: ColumnSet,
) -> Result<ExportOutcome, ExportError> {
    if rows.is_empty() {
        return Ok(ExportOutcome::Skipped);
    }

    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(columns.headers()).map_err(csv_err)?;
    for row in rows {
        writer.write_record(row.values(columns)).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = rows.len(), %columns, "csv written");
    Ok(ExportOutcome::Written(rows.len()))
}
