//! # gilbench-orchestration
//!
//! Warm-up, the single-run timer, the pairwise concurrent timer and the
//! result types they fill.

pub mod interfaces;
pub mod orchestrator;
pub mod results;
pub mod timing;

pub use interfaces::{BenchObserver, NoOpObserver, ResultPresenter, WorkerRole};
pub use orchestrator::{run_benchmark, time_pairs, time_single_runs, validate_backends, warm_up};
pub use results::{BenchReport, PairwiseMatrix, SingleRunResults};
pub use timing::TimingSample;
