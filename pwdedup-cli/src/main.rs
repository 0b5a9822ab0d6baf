use anyhow::{Context, Result};
use clap::Parser;
use pwdedup_core::try_process;
use pwdedup_ingest::{RowReader, write_rows_to_path};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod paths;
mod report;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "pwdedup=debug,pwdedup_core=debug,pwdedup_ingest=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut dedup_config = cli.dedup_config();
    if let Some(path) = &cli.config {
        dedup_config = dedup_config.merge(config::load_config(path)?.options);
    }

    let input = paths::resolve_input(&cli.input)?;
    let output = paths::output_path(&input, cli.output.as_deref(), dedup_config.overwrite_output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        config = ?dedup_config,
        "starting"
    );

    let reader = RowReader::from_path(&input)?;
    let outcome = try_process(reader, &dedup_config)
        .with_context(|| format!("reading {}", input.display()))?;

    if cli.dry_run {
        report::print_summary(&outcome, None);
        return Ok(());
    }

    write_rows_to_path(&output, &outcome.rows)?;
    report::print_summary(&outcome, Some(&output));
    Ok(())
}
