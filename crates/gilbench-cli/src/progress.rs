//! Progress bar for long benchmark runs.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::trace;

use gilbench_orchestration::interfaces::BenchObserver;
use gilbench_orchestration::timing::TimingSample;

use crate::output::format_number;

const TEMPLATE: &str = "{spinner} [{elapsed_precise}] {bar:30} {pos}/{len} {msg}";

/// Observer that advances a stderr progress bar: one step per single run,
/// one per pair.
///
/// indicatif hides the bar when stderr is not a terminal.
pub struct CLIProgressObserver {
    bar: ProgressBar,
}

impl CLIProgressObserver {
    /// Bar sized for `backends` single runs plus `backends²` pairs.
    #[must_use]
    pub fn new(backends: usize, n: u64) -> Self {
        Self::with_target(backends, n, ProgressDrawTarget::stderr())
    }

    /// Bar that never draws.
    #[must_use]
    pub fn hidden(backends: usize, n: u64) -> Self {
        Self::with_target(backends, n, ProgressDrawTarget::hidden())
    }

    fn with_target(backends: usize, n: u64, target: ProgressDrawTarget) -> Self {
        let steps = (backends + backends * backends) as u64;
        let bar = ProgressBar::with_draw_target(Some(steps), target);
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(format!("F({})", format_number(n)));
        Self { bar }
    }

    /// Steps completed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar before results are printed.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BenchObserver for CLIProgressObserver {
    fn on_warmup(&self, backend: &str) {
        self.bar.set_message(format!("warming up {backend}"));
    }

    fn on_single_run(&self, backend: &str, sample: TimingSample) {
        trace!(backend, %sample, "progress");
        self.bar.set_message(format!("{backend} alone: {sample}"));
        self.bar.inc(1);
    }

    fn on_pair_complete(&self, driver: &str, partner: &str, sample: TimingSample) {
        self.bar.set_message(format!("{driver} + {partner}: {sample}"));
        self.bar.inc(1);
    }
}
