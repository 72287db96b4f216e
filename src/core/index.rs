//! Cluster index and identifier resolution
//!
//! The index is built once per run from a single enumeration of the
//! workspace. It maps cluster ids to records and cluster names to ids.
//! When two clusters share a name, the one enumerated last wins.

use std::collections::HashMap;

use tracing::debug;

use crate::core::cluster::ClusterRecord;

/// Lookup maps over one workspace snapshot
///
/// Every id stored in `by_name` is also a key of `by_id`.
#[derive(Debug, Default)]
pub struct ClusterIndex {
    by_id: HashMap<String, ClusterRecord>,
    by_name: HashMap<String, String>,
}

impl ClusterIndex {
    /// Build the index in a single pass over the enumeration
    pub fn build(records: impl IntoIterator<Item = ClusterRecord>) -> Self {
        let mut index = Self::default();

        for record in records {
            // Records without an id can't be resolved to anything
            let Some(id) = record.cluster_id.clone() else {
                debug!(name = ?record.cluster_name, "skipping cluster without id");
                continue;
            };
            if let Some(name) = &record.cluster_name {
                if let Some(previous) = index.by_name.insert(name.clone(), id.clone()) {
                    if previous != id {
                        debug!(%name, %previous, current = %id, "duplicate cluster name");
                    }
                }
            }
            index.by_id.insert(id, record);
        }

        index
    }

    /// Number of clusters indexed by id
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get_by_id(&self, cluster_id: &str) -> Option<&ClusterRecord> {
        self.by_id.get(cluster_id)
    }

    pub fn id_for_name(&self, cluster_name: &str) -> Option<&str> {
        self.by_name.get(cluster_name).map(String::as_str)
    }

    /// Resolve one identifier, trying it as an id first, then as a name
    pub fn lookup(&self, identifier: &str) -> Option<&ClusterRecord> {
        self.get_by_id(identifier)
            .or_else(|| self.id_for_name(identifier).and_then(|id| self.get_by_id(id)))
    }

    /// Resolve every identifier, keeping input order in both result lists
    pub fn resolve_all<'a, S: AsRef<str>>(&'a self, identifiers: &[S]) -> Resolution<'a> {
        let mut resolution = Resolution::default();
        for identifier in identifiers {
            resolution.record(identifier.as_ref(), self.lookup(identifier.as_ref()));
        }
        resolution
    }
}

/// Outcome of resolving a list of identifiers
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    /// Matched records in input order
    pub found: Vec<&'a ClusterRecord>,
    /// Identifiers that matched nothing, in input order
    pub not_found: Vec<String>,
}

impl<'a> Resolution<'a> {
    /// Append the outcome for one identifier
    pub fn record(&mut self, identifier: &str, hit: Option<&'a ClusterRecord>) {
        match hit {
            Some(record) => self.found.push(record),
            None => self.not_found.push(identifier.to_string()),
        }
    }

    /// Total identifiers seen
    pub fn processed(&self) -> usize {
        self.found.len() + self.not_found.len()
    }
}
