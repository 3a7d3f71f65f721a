//! Process-wide exclusivity lock and the policy that decides who holds it.
//!
//! Native code has no interpreter lock, so the "gil" backends take a real
//! mutex around their whole loop. The "nogil" backends only touch it at the
//! call boundary: once on entry, once on the way out.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

static GLOBAL: LazyLock<Arc<ExclusivityLock>> =
    LazyLock::new(|| Arc::new(ExclusivityLock::new()));

/// A mutex guarding nothing but the right to execute.
pub struct ExclusivityLock {
    inner: Mutex<()>,
}

impl ExclusivityLock {
    /// Create a private lock, independent of the global one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// The lock shared by every default backend in the process.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Run `f` while owning the lock.
    pub fn hold<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.inner.lock();
        f()
    }

    /// Acquire and immediately release the lock.
    pub fn pass_through(&self) {
        drop(self.inner.lock());
    }

    /// Whether some thread currently owns the lock.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.inner.is_locked()
    }
}

impl Default for ExclusivityLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a backend keeps the exclusivity lock while its loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockPolicy {
    /// Hold the lock for the whole call.
    Hold,
    /// Release the lock for the loop; take it only at entry and exit.
    Release,
}

impl LockPolicy {
    /// Run `f` under this policy.
    pub fn run<R>(self, lock: &ExclusivityLock, f: impl FnOnce() -> R) -> R {
        match self {
            Self::Hold => lock.hold(f),
            Self::Release => {
                lock.pass_through();
                let out = f();
                lock.pass_through();
                out
            }
        }
    }

    /// Suffix used in backend names.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Hold => "gil",
            Self::Release => "nogil",
        }
    }
}

impl fmt::Display for LockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
