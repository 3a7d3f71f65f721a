//! Error type shared by backends and the timing harness.

/// Error type for backend compilation and benchmark execution.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// A kernel failed its compile-time self check.
    #[error("compilation of backend '{backend}' failed: {reason}")]
    Compilation { backend: String, reason: String },

    /// No backend is registered under this name.
    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    /// The backend list is empty.
    #[error("no backends to benchmark")]
    NoBackends,

    /// Two backends share a name.
    #[error("duplicate backend name: {0}")]
    DuplicateBackend(String),

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker for backend '{backend}'")]
    Spawn {
        backend: String,
        #[source]
        source: std::io::Error,
    },

    /// A worker's invocation returned an error.
    #[error("worker running backend '{backend}' failed: {reason}")]
    WorkerFailed { backend: String, reason: String },

    /// A worker thread panicked.
    #[error("worker running backend '{backend}' panicked: {message}")]
    WorkerPanicked { backend: String, message: String },
}
