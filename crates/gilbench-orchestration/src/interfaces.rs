//! Orchestration interfaces.

use std::fmt;
use std::io::Write;

use crate::results::BenchReport;
use crate::timing::TimingSample;

/// Which side of a timed pair a worker runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerRole {
    /// First-started worker; its backend keys the matrix row.
    Driver,
    /// Second-started worker.
    Partner,
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver => f.write_str("driver"),
            Self::Partner => f.write_str("partner"),
        }
    }
}

/// Observer for benchmark progress.
///
/// All calls come from the measuring thread. `on_worker_started` fires
/// inside the timing window, right after each spawn, so implementations
/// must be cheap there.
pub trait BenchObserver: Send + Sync {
    /// A first-call backend was warmed up.
    fn on_warmup(&self, _backend: &str) {}

    /// A backend finished its uncontended run.
    fn on_single_run(&self, _backend: &str, _sample: TimingSample) {}

    /// A worker thread was spawned.
    fn on_worker_started(&self, _role: WorkerRole, _backend: &str) {}

    /// Both workers of a pair were joined.
    fn on_pair_complete(&self, _driver: &str, _partner: &str, _sample: TimingSample) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BenchObserver for NoOpObserver {}

/// Trait for presenting a finished benchmark.
pub trait ResultPresenter: Send + Sync {
    /// Write the report to `out`.
    fn present(&self, report: &BenchReport, out: &mut dyn Write) -> std::io::Result<()>;
}
