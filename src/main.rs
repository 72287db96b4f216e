use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use compute_lister::cli::Cli;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    init_logging();

    let cli = Cli::parse();
    compute_lister::cli::run(cli)
}

/// Diagnostics go to stderr, filtered by RUST_LOG (default: warn)
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
