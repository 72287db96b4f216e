//! The compute-lister run
//!
//! [`run`] does the pre-flight checks (input file, credentials) and wires up
//! the HTTP client. [`execute`] is the pipeline proper and works against any
//! [`Workspace`] that can also look up policies.

use console::style;
use miette::Result;
use tracing::info;

use crate::cli::output::{format_found, format_not_found, print_banner, print_summary};
use crate::cli::Cli;
use crate::core::config::WorkspaceConfig;
use crate::core::export::{export_csv, ColumnSet, ExportOutcome, ResolvedRow};
use crate::core::identifiers::{read_identifiers, InputError};
use crate::core::index::{ClusterIndex, Resolution};
use crate::core::policy::PolicyNameCache;
use crate::core::workspace::{ListProgress, PolicyLookup, Workspace, WorkspaceClient};

/// Knobs for [`execute`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub columns: ColumnSet,
    pub quiet: bool,
}

/// Result of matching identifiers against the workspace
#[derive(Debug, Default)]
pub struct RunReport {
    /// Clusters in the workspace snapshot
    pub clusters_loaded: usize,
    /// Rows for matched identifiers, in input order
    pub rows: Vec<ResolvedRow>,
    /// Identifiers that matched nothing, in input order
    pub not_found: Vec<String>,
    /// Remote policy lookups performed
    pub policy_lookups: usize,
}

impl RunReport {
    pub fn processed(&self) -> usize {
        self.rows.len() + self.not_found.len()
    }
}

/// Run the full command
pub fn run(cli: Cli) -> Result<()> {
    print_banner(&cli);

    let identifiers = read_identifiers(&cli.input_file).map_err(|e| miette::miette!("{}", e))?;
    println!(
        "Read {} cluster identifiers from {}",
        style(identifiers.len()).cyan(),
        cli.input_file.display()
    );
    if identifiers.is_empty() {
        let err = InputError::Empty {
            path: cli.input_file.clone(),
        };
        return Err(miette::miette!("{}", err));
    }

    let config = WorkspaceConfig::from_env().map_err(|e| miette::miette!("{}", e))?;
    info!(host = %config.host(), "connecting to workspace");
    let client = WorkspaceClient::new(&config).map_err(|e| miette::miette!("{}", e))?;
    install_interrupt_handler(client.progress())?;

    let columns = cli.column_set();
    let options = RunOptions {
        columns,
        quiet: cli.quiet,
    };
    let report = execute(&client, &identifiers, options)?;

    print_summary(report.processed(), report.rows.len(), &report.not_found);

    match export_csv(&report.rows, &cli.output_file, columns)
        .map_err(|e| miette::miette!("{}", e))?
    {
        ExportOutcome::Skipped => println!("No clusters to export."),
        ExportOutcome::Written(count) => println!(
            "\n{} Exported {} clusters to {}",
            style("✓").green(),
            style(count).cyan(),
            style(cli.output_file.display()).dim()
        ),
    }

    println!("\nDone!");
    Ok(())
}

/// Exit with status 1 on Ctrl-C, reporting how far the listing got
///
/// An interrupt before the export leaves no CSV behind.
fn install_interrupt_handler(progress: ListProgress) -> Result<()> {
    ctrlc::set_handler(move || {
        if progress.is_listing() {
            println!(
                "\n{} Interrupted while listing clusters ({} loaded from {} pages)",
                style("✗").red(),
                progress.clusters(),
                progress.pages()
            );
        } else {
            println!("\n{} Interrupted", style("✗").red());
        }
        std::process::exit(1);
    })
    .map_err(|e| miette::miette!("Failed to install interrupt handler: {}", e))
}

/// List the workspace once, then resolve each identifier in order
///
/// Policy names are only looked up when `options.columns` exports them, and
/// each distinct policy id is looked up at most once.
pub fn execute<W>(
    workspace: &W,
    identifiers: &[String],
    options: RunOptions,
) -> Result<RunReport>
where
    W: Workspace + PolicyLookup,
{
    println!("\nFetching cluster details from Databricks workspace...");

    let clusters = workspace
        .list_clusters()
        .map_err(|e| miette::miette!("Error listing clusters: {}", e))?;
    let index = ClusterIndex::build(clusters);
    println!("Loaded {} clusters from workspace\n", style(index.len()).cyan());

    let mut policies = PolicyNameCache::new();
    let mut resolution = Resolution::default();
    let mut rows = Vec::new();

    for identifier in identifiers {
        let hit = index.lookup(identifier);
        match hit {
            Some(record) => {
                let policy_name = if options.columns.needs_policy_names() {
                    policies.resolve(workspace, record.policy_id.as_deref())
                } else {
                    None
                };
                if !options.quiet {
                    println!("{}", format_found(record, policy_name.as_deref()));
                }
                rows.push(ResolvedRow::from_record(record, policy_name));
            }
            None => {
                if !options.quiet {
                    println!("{}", format_not_found(identifier));
                }
            }
        }
        resolution.record(identifier, hit);
    }

    info!(
        processed = resolution.processed(),
        found = resolution.found.len(),
        not_found = resolution.not_found.len(),
        policy_lookups = policies.lookups(),
        "resolution finished"
    );

    Ok(RunReport {
        clusters_loaded: index.len(),
        rows,
        not_found: resolution.not_found,
        policy_lookups: policies.lookups(),
    })
}
