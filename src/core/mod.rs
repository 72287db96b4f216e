//! Core module - cluster records, lookup, enrichment and export

pub mod cluster;
pub mod config;
pub mod export;
pub mod identifiers;
pub mod index;
pub mod policy;
pub mod workspace;

pub use cluster::{ApiCluster, ClusterRecord};
pub use config::{ConfigError, WorkspaceConfig};
pub use export::{export_csv, ColumnSet, ExportError, ExportOutcome, ResolvedRow};
pub use identifiers::{parse_identifiers, read_identifiers, InputError};
pub use index::{ClusterIndex, Resolution};
pub use policy::PolicyNameCache;
pub use workspace::{ListProgress, PolicyLookup, Workspace, WorkspaceClient, WorkspaceError};
