//! # gilbench-core
//!
//! Numeric backends for the lock-release benchmark: an iterative Fibonacci
//! kernel, a process-wide exclusivity lock, and the two compilation
//! strategies that turn the kernel into named, thread-safe backends.

pub mod backend;
pub mod constants;
pub mod error;
pub mod kernel;
pub mod lock;
pub mod registry;

// Re-exports
pub use backend::{AotBackend, Backend, CompiledKernel, JitBackend, KernelFn};
pub use constants::{BACKEND_NAMES, DEFAULT_N, FIB_TABLE, MAX_FIB_U64, WARMUP_N};
pub use error::BenchError;
pub use lock::{ExclusivityLock, LockPolicy};
pub use registry::{default_backends, BackendFactory, DefaultFactory};

/// Compute F(n) with the bare kernel, wrapping modulo 2^64.
///
/// # Example
/// ```
/// assert_eq!(gilbench_core::fibonacci(10), 55);
/// assert_eq!(gilbench_core::fibonacci(0), 0);
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> u64 {
    kernel::fib_wrapping(n)
}
