//! gilbench — concurrent Fibonacci with and without an exclusivity lock.

use anyhow::Result;
use gilbench_lib::{app, config};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the tables.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let config = config::AppConfig::parse();
    app::run(&config)
}
