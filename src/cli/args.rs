//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::core::export::ColumnSet;

pub const DEFAULT_INPUT_FILE: &str = "sandbox-pastel.txt";
pub const DEFAULT_OUTPUT_FILE: &str = "databricks_compute_list.csv";

#[derive(Parser, Debug)]
#[command(name = "compute-lister")]
#[command(author, version)]
#[command(
    about = "List all-purpose compute clusters from a Databricks workspace with their policy IDs"
)]
#[command(after_help = "Examples:
  compute-lister
  compute-lister -i my-clusters.txt -o results.csv
  compute-lister --input-file clusters.txt --output-file output.csv --columns policy

Requires DATABRICKS_HOST and DATABRICKS_TOKEN in the environment.")]
pub struct Cli {
    /// Input file containing cluster identifiers (one per line)
    #[arg(short = 'i', long, default_value = DEFAULT_INPUT_FILE)]
    pub input_file: PathBuf,

    /// Output CSV file path
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Column set to export (policy also resolves policy names)
    #[arg(short = 'c', long, value_enum, default_value_t = ColumnsArg::Full)]
    pub columns: ColumnsArg,

    /// Only print the summary, not a line per identifier
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// `--columns` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnsArg {
    /// Cluster details: id, name, state, policy id, source, sizing, runtime
    Full,
    /// Name, policy id and resolved policy name
    Policy,
}

impl From<ColumnsArg> for ColumnSet {
    fn from(arg: ColumnsArg) -> Self {
        match arg {
            ColumnsArg::Full => ColumnSet::Full,
            ColumnsArg::Policy => ColumnSet::Policy,
        }
    }
}

impl std::fmt::Display for ColumnsArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ColumnSet::from(*self))
    }
}

impl Cli {
    /// Column set selected on the command line
    pub fn column_set(&self) -> ColumnSet {
        self.columns.into()
    }
}
