//! CLI module - argument parsing and the run itself

pub mod args;
pub mod output;
pub mod run;

pub use args::{Cli, ColumnsArg};
pub use run::{execute, run, RunOptions, RunReport};
