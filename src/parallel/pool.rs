//! Rayon thread pool sizing for Monte Carlo voyage runs.
//!
//! [WorkerPool::install] runs a closure on a pool with a fixed number of
//! threads, or on Rayon's global pool (all CPU cores) when no count is set.

use rayon::ThreadPoolBuilder;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` with this pool's thread count. Falls back to the global pool
    /// if a dedicated pool cannot be built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                warn!(workers = self.workers, error = %err, "falling back to global rayon pool");
                f()
            }
        }
    }
}
