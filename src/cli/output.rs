//! Console output for a run
//!
//! Everything user-facing goes to stdout here; diagnostics go through
//! `tracing` to stderr.

use console::style;

use crate::cli::Cli;
use crate::core::cluster::ClusterRecord;

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header block with the run's inputs
pub fn print_banner(cli: &Cli) {
    println!("{}", rule());
    println!("{}", style("Databricks All-Purpose Compute Lister").bold());
    println!("{}", rule());
    println!("Input file: {}", style(cli.input_file.display()).cyan());
    println!("Output file: {}", style(cli.output_file.display()).cyan());
    println!("Columns: {}", style(cli.columns).cyan());
    println!("{}", rule());
}

/// Line for a resolved identifier
pub fn format_found(record: &ClusterRecord, policy_name: Option<&str>) -> String {
    let mut line = format!(
        "{} Found: {} ({}) - Policy ID: {}",
        style("✓").green(),
        style(record.display_name()).cyan(),
        record.state.as_deref().unwrap_or("UNKNOWN"),
        record.policy_id.as_deref().unwrap_or("None"),
    );
    if let Some(name) = policy_name {
        line.push_str(&format!(" - Policy: {}", style(name).yellow()));
    }
    line
}

/// Line for an identifier that matched nothing
pub fn format_not_found(identifier: &str) -> String {
    format!("{} Not Found: {}", style("✗").red(), identifier)
}

/// End-of-run counts and the identifiers that matched nothing
pub fn format_summary(processed: usize, found: usize, not_found: &[String]) -> String {
    let mut lines = vec![
        rule(),
        style("Summary:").bold().to_string(),
        format!("  Total processed: {}", processed),
        format!("  Found: {}", style(found).green()),
        format!("  Not found: {}", style(not_found.len()).yellow()),
    ];
    if !not_found.is_empty() {
        lines.push(String::new());
        lines.push(format!("  Not found clusters: {}", not_found.join(", ")));
    }
    lines.push(rule());
    lines.join("\n")
}

pub fn print_summary(processed: usize, found: usize, not_found: &[String]) {
    println!();
    println!("{}", format_summary(processed, found, not_found));
    println!();
}
