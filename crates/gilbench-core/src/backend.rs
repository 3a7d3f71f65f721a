//! Backends: a compiled kernel, a lock policy and a name.
//!
//! `Backend` is the public trait consumed by the harness.
//! `CompiledKernel` is a kernel entry point that passed its self check.
//! `AotBackend` compiles when it is built; `JitBackend` compiles on first call.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::constants::{FIB_TABLE, WARMUP_N};
use crate::error::BenchError;
use crate::lock::{ExclusivityLock, LockPolicy};

/// Kernel entry point.
pub type KernelFn = fn(u64) -> u64;

/// Public trait for benchmark backends.
///
/// Implementations must be pure: the same `n` always gives the same value,
/// and concurrent calls from several threads never interfere.
pub trait Backend: Send + Sync {
    /// Unique name of this backend.
    fn name(&self) -> &str;

    /// Whether the backend keeps the exclusivity lock while computing.
    fn policy(&self) -> LockPolicy;

    /// Whether the first call pays a compilation cost.
    fn requires_warmup(&self) -> bool;

    /// Compute F(n).
    fn invoke(&self, n: u64) -> Result<u64, BenchError>;
}

/// A kernel that passed compilation, bound to its lock.
pub struct CompiledKernel {
    entry: KernelFn,
    policy: LockPolicy,
    lock: Arc<ExclusivityLock>,
}

impl CompiledKernel {
    /// Check `entry` against F(0..=WARMUP_N) and bind it to `lock`.
    pub fn compile(
        backend: &str,
        entry: KernelFn,
        policy: LockPolicy,
        lock: Arc<ExclusivityLock>,
    ) -> Result<Self, BenchError> {
        for (n, &expected) in FIB_TABLE.iter().enumerate().take(WARMUP_N as usize + 1) {
            let got = entry(n as u64);
            if got != expected {
                return Err(BenchError::Compilation {
                    backend: backend.to_string(),
                    reason: format!("F({n}) = {got}, expected {expected}"),
                });
            }
        }
        debug!(backend, %policy, "kernel compiled");
        Ok(Self {
            entry,
            policy,
            lock,
        })
    }

    /// Run the kernel under its lock policy.
    #[inline]
    pub fn call(&self, n: u64) -> u64 {
        let entry = self.entry;
        self.policy.run(&self.lock, || entry(n))
    }

    #[must_use]
    pub fn policy(&self) -> LockPolicy {
        self.policy
    }
}

/// Backend compiled ahead of time, when it is constructed.
pub struct AotBackend {
    name: String,
    kernel: CompiledKernel,
}

impl AotBackend {
    /// Build and compile a backend.
    pub fn new(
        name: impl Into<String>,
        entry: KernelFn,
        policy: LockPolicy,
        lock: Arc<ExclusivityLock>,
    ) -> Result<Self, BenchError> {
        let name = name.into();
        let kernel = CompiledKernel::compile(&name, entry, policy, lock)?;
        Ok(Self { name, kernel })
    }
}

impl Backend for AotBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> LockPolicy {
        self.kernel.policy()
    }

    fn requires_warmup(&self) -> bool {
        false
    }

    fn invoke(&self, n: u64) -> Result<u64, BenchError> {
        Ok(self.kernel.call(n))
    }
}

/// Backend compiled on its first invocation.
///
/// A failed compilation is reported to that caller and retried on the next
/// call; a successful one is cached for the life of the backend.
pub struct JitBackend {
    name: String,
    entry: KernelFn,
    policy: LockPolicy,
    lock: Arc<ExclusivityLock>,
    compiled: OnceLock<CompiledKernel>,
}

impl JitBackend {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        entry: KernelFn,
        policy: LockPolicy,
        lock: Arc<ExclusivityLock>,
    ) -> Self {
        Self {
            name: name.into(),
            entry,
            policy,
            lock,
            compiled: OnceLock::new(),
        }
    }

    /// Whether the first-call compilation has already happened.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    fn kernel(&self) -> Result<&CompiledKernel, BenchError> {
        if let Some(kernel) = self.compiled.get() {
            return Ok(kernel);
        }
        let kernel =
            CompiledKernel::compile(&self.name, self.entry, self.policy, Arc::clone(&self.lock))?;
        // Another thread may have won the race; either kernel is equivalent.
        Ok(self.compiled.get_or_init(|| kernel))
    }
}

impl Backend for JitBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(&self) -> LockPolicy {
        self.policy
    }

    fn requires_warmup(&self) -> bool {
        true
    }

    fn invoke(&self, n: u64) -> Result<u64, BenchError> {
        Ok(self.kernel()?.call(n))
    }
}
