//! Core orchestration: warm-up, single runs and the pairwise matrix.

use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, info};

use gilbench_core::{Backend, BenchError, WARMUP_N};

use crate::interfaces::{BenchObserver, WorkerRole};
use crate::results::{BenchReport, PairwiseMatrix, SingleRunResults};
use crate::timing::TimingSample;

type Worker = JoinHandle<Result<u64, BenchError>>;

/// Reject an empty list or repeated names.
pub fn validate_backends(backends: &[Arc<dyn Backend>]) -> Result<(), BenchError> {
    if backends.is_empty() {
        return Err(BenchError::NoBackends);
    }
    let mut seen = HashSet::new();
    for backend in backends {
        if !seen.insert(backend.name()) {
            return Err(BenchError::DuplicateBackend(backend.name().to_string()));
        }
    }
    Ok(())
}

/// Invoke every first-call backend once so compilation stays out of timing.
pub fn warm_up(
    backends: &[Arc<dyn Backend>],
    observer: &dyn BenchObserver,
) -> Result<(), BenchError> {
    for backend in backends.iter().filter(|b| b.requires_warmup()) {
        backend.invoke(WARMUP_N)?;
        debug!(backend = backend.name(), "warmed up");
        observer.on_warmup(backend.name());
    }
    Ok(())
}

/// Time each backend alone, one after another.
pub fn time_single_runs(
    backends: &[Arc<dyn Backend>],
    n: u64,
    observer: &dyn BenchObserver,
) -> Result<SingleRunResults, BenchError> {
    let mut results = SingleRunResults::with_backends(names_of(backends));
    for backend in backends {
        let (value, sample) = TimingSample::measure(|| backend.invoke(n));
        value?;
        debug!(backend = backend.name(), %sample, "single run");
        observer.on_single_run(backend.name(), sample);
        results.push(sample);
    }
    Ok(results)
}

/// Time every ordered (driver, partner) pair running on two fresh threads.
///
/// The driver is spawned before the partner and joined before the partner.
/// Both workers are always joined; a failure in either is returned after.
pub fn time_pairs(
    backends: &[Arc<dyn Backend>],
    n: u64,
    observer: &dyn BenchObserver,
) -> Result<PairwiseMatrix, BenchError> {
    let mut matrix = PairwiseMatrix::with_backends(names_of(backends));
    for (i, driver) in backends.iter().enumerate() {
        for partner in backends {
            let sample = time_pair(driver, partner, n, observer)?;
            debug!(
                driver = driver.name(),
                partner = partner.name(),
                %sample,
                "pair"
            );
            observer.on_pair_complete(driver.name(), partner.name(), sample);
            matrix.push(i, sample);
        }
    }
    Ok(matrix)
}

fn time_pair(
    driver: &Arc<dyn Backend>,
    partner: &Arc<dyn Backend>,
    n: u64,
    observer: &dyn BenchObserver,
) -> Result<TimingSample, BenchError> {
    let driver_job = worker_job(driver, n);
    let partner_job = worker_job(partner, n);
    let driver_thread = thread::Builder::new().name(format!("driver-{}", driver.name()));
    let partner_thread = thread::Builder::new().name(format!("partner-{}", partner.name()));

    let start = Instant::now();

    let driver_handle = driver_thread
        .spawn(driver_job)
        .map_err(|source| BenchError::Spawn {
            backend: driver.name().to_string(),
            source,
        })?;
    observer.on_worker_started(WorkerRole::Driver, driver.name());

    let partner_handle = match partner_thread.spawn(partner_job) {
        Ok(handle) => handle,
        Err(source) => {
            // Don't leave the driver running behind the error.
            let _ = abandon_worker(driver_handle, driver.name());
            return Err(BenchError::Spawn {
                backend: partner.name().to_string(),
                source,
            });
        }
    };
    observer.on_worker_started(WorkerRole::Partner, partner.name());

    let driver_result = join_worker(driver_handle, driver.name());
    let partner_result = join_worker(partner_handle, partner.name());

    let end = Instant::now();

    driver_result?;
    partner_result?;
    Ok(TimingSample::between(start, end))
}

fn worker_job(
    backend: &Arc<dyn Backend>,
    n: u64,
) -> impl FnOnce() -> Result<u64, BenchError> + Send + 'static {
    let backend = Arc::clone(backend);
    move || backend.invoke(n)
}

fn join_worker(handle: Worker, backend: &str) -> Result<u64, BenchError> {
    match handle.join() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(BenchError::WorkerFailed {
            backend: backend.to_string(),
            reason: err.to_string(),
        }),
        Err(payload) => Err(BenchError::WorkerPanicked {
            backend: backend.to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Join a worker whose pair is already lost; its outcome is only logged.
fn abandon_worker(handle: Worker, backend: &str) -> Result<u64, BenchError> {
    let outcome = join_worker(handle, backend);
    match &outcome {
        Ok(value) => debug!(backend, value, "abandoned worker finished"),
        Err(err) => debug!(backend, error = %err, "abandoned worker failed"),
    }
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn names_of(backends: &[Arc<dyn Backend>]) -> Vec<String> {
    backends.iter().map(|b| b.name().to_string()).collect()
}

/// Run the whole benchmark: validate, warm up, single runs, then pairs.
///
/// Returns a complete report or the first error; nothing partial.
pub fn run_benchmark(
    backends: &[Arc<dyn Backend>],
    n: u64,
    observer: &dyn BenchObserver,
) -> Result<BenchReport, BenchError> {
    validate_backends(backends)?;

    info!(backends = backends.len(), "warming up first-call backends");
    warm_up(backends, observer)?;

    info!(n, "timing single runs");
    let single = time_single_runs(backends, n, observer)?;

    info!(n, pairs = backends.len() * backends.len(), "timing concurrent pairs");
    let pairwise = time_pairs(backends, n, observer)?;

    Ok(BenchReport {
        n,
        single,
        pairwise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gilbench_core::registry::{default_backends, DefaultFactory};
    use gilbench_core::{ExclusivityLock, LockPolicy, BACKEND_NAMES};
    use parking_lot::Mutex;

    use crate::interfaces::NoOpObserver;

    /// Test backend with a programmable outcome.
    struct Scripted {
        name: String,
        warmup: bool,
        calls: AtomicUsize,
        fail_above: Option<u64>,
        panic: bool,
    }

    impl Scripted {
        fn new(name: &str) -> Self {
            Self {
                name: name.into(),
                warmup: false,
                calls: AtomicUsize::new(0),
                fail_above: None,
                panic: false,
            }
        }
    }

    impl Backend for Scripted {
        fn name(&self) -> &str {
            &self.name
        }
        fn policy(&self) -> LockPolicy {
            LockPolicy::Release
        }
        fn requires_warmup(&self) -> bool {
            self.warmup
        }
        fn invoke(&self, n: u64) -> Result<u64, BenchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.panic {
                panic!("kernel exploded");
            }
            if self.fail_above.is_some_and(|limit| n > limit) {
                return Err(BenchError::Compilation {
                    backend: self.name.clone(),
                    reason: "scripted".into(),
                });
            }
            Ok(gilbench_core::fibonacci(n))
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl BenchObserver for Recorder {
        fn on_warmup(&self, backend: &str) {
            self.events.lock().push(format!("warmup {backend}"));
        }
        fn on_single_run(&self, backend: &str, _sample: TimingSample) {
            self.events.lock().push(format!("single {backend}"));
        }
        fn on_worker_started(&self, role: WorkerRole, backend: &str) {
            self.events.lock().push(format!("{role} {backend}"));
        }
        fn on_pair_complete(&self, driver: &str, partner: &str, _sample: TimingSample) {
            self.events.lock().push(format!("pair {driver} {partner}"));
        }
    }

    fn private_backends() -> Vec<Arc<dyn Backend>> {
        let factory = DefaultFactory::with_lock(Arc::new(ExclusivityLock::new()));
        default_backends(&factory).unwrap()
    }

    fn scripted(list: Vec<Scripted>) -> Vec<Arc<dyn Backend>> {
        list.into_iter()
            .map(|b| Arc::new(b) as Arc<dyn Backend>)
            .collect()
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(matches!(validate_backends(&[]), Err(BenchError::NoBackends)));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let backends = scripted(vec![Scripted::new("x"), Scripted::new("x")]);
        assert!(matches!(
            validate_backends(&backends),
            Err(BenchError::DuplicateBackend(name)) if name == "x"
        ));
    }

    #[test]
    fn warm_up_only_touches_first_call_backends() {
        let mut jit = Scripted::new("jit");
        jit.warmup = true;
        let jit = Arc::new(jit);
        let aot = Arc::new(Scripted::new("aot"));
        let backends: Vec<Arc<dyn Backend>> =
            vec![aot.clone() as Arc<dyn Backend>, jit.clone() as Arc<dyn Backend>];

        let recorder = Recorder::default();
        warm_up(&backends, &recorder).unwrap();
        assert_eq!(jit.calls.load(Ordering::SeqCst), 1);
        assert_eq!(aot.calls.load(Ordering::SeqCst), 0);
        assert_eq!(*recorder.events.lock(), ["warmup jit"]);
    }

    #[test]
    fn warm_up_failure_is_fatal() {
        let mut broken = Scripted::new("broken");
        broken.warmup = true;
        broken.fail_above = Some(0);
        let backends = scripted(vec![broken]);
        assert!(matches!(
            warm_up(&backends, &NoOpObserver),
            Err(BenchError::Compilation { .. })
        ));
    }

    #[test]
    fn single_runs_one_per_backend() {
        let backends = private_backends();
        let single = time_single_runs(&backends, 20, &NoOpObserver).unwrap();
        assert_eq!(single.len(), BACKEND_NAMES.len());
        assert!(single.is_complete());
        assert_eq!(single.names(), BACKEND_NAMES);
        assert!(single.formatted().iter().all(|s| s.ends_with("ms")));
    }

    #[test]
    fn pairs_fill_square_matrix() {
        let backends = private_backends();
        let matrix = time_pairs(&backends, 20, &NoOpObserver).unwrap();
        assert_eq!(matrix.len(), backends.len());
        for (_, row) in matrix.rows() {
            assert_eq!(row.len(), backends.len());
        }
        assert!(matrix.is_complete());
    }

    #[test]
    fn pairs_visit_partners_in_order_and_start_driver_first() {
        let backends = scripted(vec![Scripted::new("a"), Scripted::new("b")]);
        let recorder = Recorder::default();
        time_pairs(&backends, 10, &recorder).unwrap();

        let expected = [
            "driver a", "partner a", "pair a a",
            "driver a", "partner b", "pair a b",
            "driver b", "partner a", "pair b a",
            "driver b", "partner b", "pair b b",
        ];
        assert_eq!(*recorder.events.lock(), expected);
    }

    #[test]
    fn pair_runs_each_backend_once() {
        let a = Arc::new(Scripted::new("a"));
        let b = Arc::new(Scripted::new("b"));
        let backends: Vec<Arc<dyn Backend>> =
            vec![a.clone() as Arc<dyn Backend>, b.clone() as Arc<dyn Backend>];
        time_pairs(&backends, 10, &NoOpObserver).unwrap();
        // Each backend drives two pairs and partners in two.
        assert_eq!(a.calls.load(Ordering::SeqCst), 4);
        assert_eq!(b.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn worker_error_propagates() {
        let mut bad = Scripted::new("bad");
        bad.fail_above = Some(5);
        let backends = scripted(vec![Scripted::new("ok"), bad]);
        let err = time_pairs(&backends, 10, &NoOpObserver).unwrap_err();
        match err {
            BenchError::WorkerFailed { backend, reason } => {
                assert_eq!(backend, "bad");
                assert!(reason.contains("scripted"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn driver_error_wins_over_partner_error() {
        let mut first = Scripted::new("first");
        first.fail_above = Some(0);
        let mut second = Scripted::new("second");
        second.fail_above = Some(0);
        let first: Arc<dyn Backend> = Arc::new(first);
        let second: Arc<dyn Backend> = Arc::new(second);

        let err = time_pair(&first, &second, 10, &NoOpObserver).unwrap_err();
        assert!(matches!(err, BenchError::WorkerFailed { ref backend, .. } if backend == "first"));

        let err = time_pair(&second, &first, 10, &NoOpObserver).unwrap_err();
        assert!(matches!(err, BenchError::WorkerFailed { ref backend, .. } if backend == "second"));
    }

    #[test]
    fn worker_panic_propagates() {
        let mut boom = Scripted::new("boom");
        boom.panic = true;
        let backends = scripted(vec![boom]);
        let err = time_pairs(&backends, 10, &NoOpObserver).unwrap_err();
        match err {
            BenchError::WorkerPanicked { backend, message } => {
                assert_eq!(backend, "boom");
                assert_eq!(message, "kernel exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn abandoned_worker_keeps_its_panic() {
        let handle: Worker = thread::spawn(|| panic!("driver died"));
        match abandon_worker(handle, "driver") {
            Err(BenchError::WorkerPanicked { backend, message }) => {
                assert_eq!(backend, "driver");
                assert_eq!(message, "driver died");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn abandoned_worker_keeps_its_value() {
        let handle: Worker = thread::spawn(|| Ok(55));
        assert_eq!(abandon_worker(handle, "driver").unwrap(), 55);
    }

    #[test]
    fn run_benchmark_is_all_or_nothing() {
        let mut late = Scripted::new("late");
        late.fail_above = Some(WARMUP_N);
        let backends = scripted(vec![Scripted::new("fine"), late]);
        assert!(run_benchmark(&backends, 20, &NoOpObserver).is_err());
    }

    #[test]
    fn run_benchmark_full_report() {
        let backends = private_backends();
        let recorder = Recorder::default();
        let report = run_benchmark(&backends, 20, &recorder).unwrap();
        assert_eq!(report.n, 20);
        assert_eq!(report.single.len(), 4);
        assert_eq!(report.pairwise.len(), 4);
        assert!(report.pairwise.is_complete());

        let events = recorder.events.lock();
        let warmups: Vec<&String> = events.iter().filter(|e| e.starts_with("warmup")).collect();
        assert_eq!(warmups, ["warmup numba_gil", "warmup numba_nogil"]);
        assert_eq!(events.iter().filter(|e| e.starts_with("pair")).count(), 16);
    }
}
