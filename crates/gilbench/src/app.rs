//! Application entry point.

use std::io;

use anyhow::{Context, Result};
use tracing::info;

use gilbench_cli::{CLIProgressObserver, CLIResultPresenter};
use gilbench_core::registry::{default_backends, DefaultFactory};
use gilbench_orchestration::interfaces::ResultPresenter;
use gilbench_orchestration::orchestrator::run_benchmark;

use crate::config::AppConfig;

/// Run the benchmark and print both tables to stdout.
pub fn run(config: &AppConfig) -> Result<()> {
    let mut stdout = io::stdout().lock();
    run_with_output(config, &mut stdout)
}

/// Run the benchmark and write both tables to `out`.
///
/// Nothing is written unless every measurement succeeded.
pub fn run_with_output(config: &AppConfig, out: &mut dyn io::Write) -> Result<()> {
    let factory = DefaultFactory::new();
    let backends = default_backends(&factory).context("building backends")?;
    info!(n = config.n, backends = backends.len(), "starting benchmark");

    let progress = CLIProgressObserver::new(backends.len(), config.n);
    let report = run_benchmark(&backends, config.n, &progress);
    progress.finish();
    let report = report.context("benchmark aborted")?;

    CLIResultPresenter::new()
        .present(&report, out)
        .context("writing results")?;
    Ok(())
}
