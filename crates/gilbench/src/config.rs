//! Application configuration from CLI flags and environment.

use clap::Parser;

use gilbench_core::DEFAULT_N;

/// Time four Fibonacci backends alone and in every concurrent pair.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gilbench", version, about)]
pub struct AppConfig {
    /// Fibonacci number to calculate.
    #[arg(short, long, default_value_t = DEFAULT_N, env = "GILBENCH_N")]
    pub n: u64,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { n: DEFAULT_N }
    }
}
