//! Worker pool executing asynchronous sends.
//!
//! The pool is the only mutable shared resource in the engine. By default
//! the service owns a dedicated multi-threaded tokio runtime; callers that
//! already run inside a runtime can hand the service a [`Handle`] instead,
//! in which case closing the pool releases nothing.

use std::future::Future;
use std::io;

use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

/// Executes async send tasks, either on an owned runtime or on a
/// caller-supplied handle.
pub struct WorkerPool {
    runtime: Option<Runtime>,
    handle: Handle,
}

impl WorkerPool {
    /// Create a pool backed by its own multi-threaded runtime.
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("dispatchify-worker")
            .build()?;
        let handle = runtime.handle().clone();
        Ok(Self {
            runtime: Some(runtime),
            handle,
        })
    }

    /// Create a pool that submits onto an existing runtime. The runtime's
    /// lifecycle stays with the caller; [`WorkerPool::close`] is a no-op.
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            runtime: None,
            handle,
        }
    }

    /// Submit a task. Safe to call concurrently from multiple threads.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Shut down an owned runtime without blocking. Idempotent; a no-op
    /// for handle-backed pools. Spawning after close is undefined.
    pub fn close(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("owned_runtime", &self.runtime.is_some())
            .finish()
    }
}
