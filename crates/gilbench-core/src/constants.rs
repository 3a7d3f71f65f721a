//! Benchmark defaults and reference values.

/// Default Fibonacci index for every timed invocation.
///
/// Large enough that the numeric loop dominates thread start/join overhead.
pub const DEFAULT_N: u64 = 1_000_000_000;

/// Index used to trigger first-call compilation outside the timing window.
pub const WARMUP_N: u64 = 15;

/// Maximum Fibonacci index that fits in a u64.
/// F(93) = 12200160415121876738
pub const MAX_FIB_U64: u64 = 93;

/// Registered backend names, in benchmark order.
pub const BACKEND_NAMES: [&str; 4] = ["cython_gil", "cython_nogil", "numba_gil", "numba_nogil"];

/// Exact Fibonacci values for n = 0..=93.
///
/// Compilation checks a kernel against the head of this table before the
/// kernel is handed out as a backend.
pub const FIB_TABLE: [u64; 94] = {
    let mut table = [0u64; 94];
    table[1] = 1;
    let mut i = 2;
    while i < table.len() {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};
