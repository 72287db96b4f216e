//! Memoized policy-name resolution
//!
//! Many clusters usually share a handful of policies. The cache makes sure a
//! policy id costs at most one remote lookup per run. Failed lookups are
//! cached as "no name" and never retried.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::workspace::PolicyLookup;

/// Run-scoped cache of `policy_id -> policy name`
///
/// A `None` value records a policy with no name or a failed lookup.
#[derive(Debug, Default)]
pub struct PolicyNameCache {
    entries: HashMap<String, Option<String>>,
    lookups: usize,
}

impl PolicyNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a policy id to its name, consulting the remote only on a miss
    pub fn resolve(
        &mut self,
        lookup: &dyn PolicyLookup,
        policy_id: Option<&str>,
    ) -> Option<String> {
        let policy_id = policy_id.filter(|id| !id.is_empty())?;

        if let Some(cached) = self.entries.get(policy_id) {
            return cached.clone();
        }

        debug!(%policy_id, "policy cache miss");
        self.lookups += 1;
        let name = match lookup.policy_name(policy_id) {
            Ok(name) => name,
            Err(e) => {
                warn!(%policy_id, kind = e.kind(), error = %e, "policy lookup failed");
                None
            }
        };

        self.entries.insert(policy_id.to_string(), name.clone());
        name
    }

    /// Number of distinct policy ids seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of remote lookups performed
    pub fn lookups(&self) -> usize {
        self.lookups
    }
}
