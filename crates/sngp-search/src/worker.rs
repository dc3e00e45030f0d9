//! Background thread that advances a shared search loop.

use crate::search::{RunEvent, SearchLoop};
use parking_lot::Mutex;
use sngp_core::{Error, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info};

/// Handle to the worker thread driving a `SearchLoop`.
///
/// The worker takes the lock once per generation and releases it before the
/// next one, so foreground readers and controls interleave between generations.
pub struct WorkerHandle {
    search: Arc<Mutex<SearchLoop>>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Mark the search as running and spawn the worker thread
    pub fn start(search: Arc<Mutex<SearchLoop>>) -> Result<Self> {
        search.lock().run_state_mut().running = true;

        let shared = Arc::clone(&search);
        let spawned = thread::Builder::new()
            .name("sngp-search".to_string())
            .spawn(move || worker_loop(shared));

        match spawned {
            Ok(thread) => {
                debug!("Worker thread started");
                Ok(Self {
                    search,
                    thread: Some(thread),
                })
            }
            Err(e) => {
                search.lock().run_state_mut().running = false;
                Err(Error::Io(e))
            }
        }
    }

    /// Ask the worker to stop after its current generation
    pub fn request_stop(&self) {
        self.search.lock().run_state_mut().running = false;
    }

    /// Returns true once the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stop the worker and wait for it to exit
    pub fn join(mut self) -> Result<()> {
        self.request_stop();
        self.wait()
    }

    fn wait(&mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| Error::InvalidState("search worker panicked".to_string()))?;
            debug!("Worker thread joined");
        }
        Ok(())
    }
}

impl Drop for WorkerHandle {
    /// A handle must be joined before it is dropped. Debug builds panic on an
    /// un-joined handle; release builds log the misuse, then stop and join.
    fn drop(&mut self) {
        let joined = self.thread.is_none();
        if !joined {
            error!("Worker handle dropped without join");
            self.request_stop();
            if let Err(e) = self.wait() {
                error!("Failed to join worker: {}", e);
            }
        }
        if !thread::panicking() {
            debug_assert!(joined, "WorkerHandle dropped without join");
        }
    }
}

fn worker_loop(search: Arc<Mutex<SearchLoop>>) {
    loop {
        let mut guard = search.lock();
        if !guard.run_state().running {
            break;
        }
        match guard.advance() {
            RunEvent::Continue(_) => {}
            RunEvent::RunCompleted { hit } => {
                debug!(hit, runs = guard.stats().runs, "Starting next run");
            }
            RunEvent::Finished { .. } => {
                info!(
                    hits = guard.stats().hits,
                    runs = guard.stats().runs,
                    "Worker finished batch"
                );
                break;
            }
        }
        drop(guard);
    }
}
