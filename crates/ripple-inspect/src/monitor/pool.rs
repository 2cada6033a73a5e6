//! WorkerPool — bounded rayon pool with results in submission order.

use crossbeam_channel::unbounded;
use rayon::{ThreadPool, ThreadPoolBuilder};
use ripple_core::errors::PipelineError;
use ripple_core::traits::{Cancellable, CancellationToken};

/// Fixed-size pool for per-commit tasks. Tasks share nothing but what the
/// caller hands them.
pub struct WorkerPool {
    pool: ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// `threads` overrides the default of available parallelism minus one.
    pub fn new(threads: Option<usize>) -> Result<Self, PipelineError> {
        let threads = threads.unwrap_or_else(default_threads).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ripple-worker-{i}"))
            .build()
            .map_err(|e| PipelineError::WorkerPool {
                message: e.to_string(),
            })?;
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `task` over every item. Slot `i` of the result holds item `i`'s
    /// output whatever order tasks finished in. Once `cancel` fires, tasks
    /// that have not started are dropped and their slots stay `None`;
    /// running tasks finish normally.
    pub fn run_all<I, T, F>(&self, items: &[I], cancel: &CancellationToken, task: F) -> Vec<Option<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> T + Sync,
    {
        let (tx, rx) = unbounded();
        let task = &task;

        // FIFO so tasks start in submission order.
        self.pool.scope_fifo(|scope| {
            for (idx, item) in items.iter().enumerate() {
                if cancel.is_cancelled() {
                    break;
                }
                let tx = tx.clone();
                scope.spawn_fifo(move |_| {
                    if cancel.is_cancelled() {
                        return;
                    }
                    // The receiver outlives the scope.
                    let _ = tx.send((idx, task(item)));
                });
            }
        });
        drop(tx);

        let mut results: Vec<Option<T>> = (0..items.len()).map(|_| None).collect();
        for (idx, value) in rx {
            results[idx] = Some(value);
        }
        results
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}
