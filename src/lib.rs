//! Compute Lister
//!
//! Resolves a list of cluster ids or names against a Databricks workspace,
//! optionally looks up cluster policy names, and exports the matches to CSV.

pub mod cli;
pub mod core;
