//! Backend factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::{AotBackend, Backend, JitBackend};
use crate::constants::BACKEND_NAMES;
use crate::error::BenchError;
use crate::kernel::fib_wrapping;
use crate::lock::{ExclusivityLock, LockPolicy};

/// Factory trait for creating backends.
pub trait BackendFactory: Send + Sync {
    /// Get or create a backend by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Backend>, BenchError>;

    /// List all available backend names, in benchmark order.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
///
/// Every backend it creates shares one exclusivity lock, the process-wide
/// one unless another is supplied.
pub struct DefaultFactory {
    lock: Arc<ExclusivityLock>,
    cache: RwLock<HashMap<String, Arc<dyn Backend>>>,
}

impl DefaultFactory {
    /// Create a factory whose backends use the global lock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lock(ExclusivityLock::global())
    }

    /// Create a factory whose backends use `lock`.
    #[must_use]
    pub fn with_lock(lock: Arc<ExclusivityLock>) -> Self {
        Self {
            lock,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_backend(&self, name: &str) -> Result<Arc<dyn Backend>, BenchError> {
        let lock = Arc::clone(&self.lock);
        match name {
            "cython_gil" => Ok(Arc::new(AotBackend::new(
                name,
                fib_wrapping,
                LockPolicy::Hold,
                lock,
            )?)),
            "cython_nogil" => Ok(Arc::new(AotBackend::new(
                name,
                fib_wrapping,
                LockPolicy::Release,
                lock,
            )?)),
            "numba_gil" => Ok(Arc::new(JitBackend::new(
                name,
                fib_wrapping,
                LockPolicy::Hold,
                lock,
            ))),
            "numba_nogil" => Ok(Arc::new(JitBackend::new(
                name,
                fib_wrapping,
                LockPolicy::Release,
                lock,
            ))),
            _ => Err(BenchError::UnknownBackend(name.to_string())),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Backend>, BenchError> {
        if let Some(backend) = self.cache.read().get(name) {
            return Ok(Arc::clone(backend));
        }

        let backend = self.create_backend(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&backend));
        Ok(backend)
    }

    fn available(&self) -> Vec<&str> {
        BACKEND_NAMES.to_vec()
    }
}

/// Every backend the factory offers, in benchmark order.
pub fn default_backends(factory: &dyn BackendFactory) -> Result<Vec<Arc<dyn Backend>>, BenchError> {
    factory
        .available()
        .into_iter()
        .map(|name| factory.get(name))
        .collect()
}
