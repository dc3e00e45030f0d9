//! Foreground control surface over a background search.

use crate::search::{GenerationOutcome, SearchLoop};
use crate::worker::WorkerHandle;
use chrono::Utc;
use parking_lot::Mutex;
use sngp_core::{Error, Result, RunStats, SearchConfig};
use sngp_graph::{program_text, FitnessProvider, NodeGraph};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Graph and fitness copied out of the search between generations
#[derive(Debug, Clone)]
struct Snapshot {
    graph: NodeGraph,
    fitness: Vec<f64>,
}

/// Owns a search loop and at most one worker thread driving it.
///
/// Control calls block only as long as it takes the worker to finish the
/// generation it is in. `pause()` joins the worker, so once it returns nothing
/// else touches the search state.
pub struct SearchSession {
    search: Arc<Mutex<SearchLoop>>,
    worker: Option<WorkerHandle>,
    snapshot: Snapshot,
}

impl SearchSession {
    pub fn new(provider: Box<dyn FitnessProvider>, config: SearchConfig) -> Result<Self> {
        let search = SearchLoop::new(provider, config)?;
        let snapshot = Snapshot {
            graph: search.graph().clone(),
            fitness: search.fitness().to_vec(),
        };
        Ok(Self {
            search: Arc::new(Mutex::new(search)),
            worker: None,
            snapshot,
        })
    }

    /// Reset everything and run a fresh batch of `runs` runs in the background
    #[instrument(skip(self))]
    pub fn start(&mut self, runs: usize) -> Result<()> {
        if runs == 0 {
            return Err(Error::Config("runs must be positive".to_string()));
        }
        self.pause()?;
        {
            let mut search = self.search.lock();
            search.reset();
            search.run_state_mut().runs_requested = runs;
            search.stats_mut().mark_started(Utc::now());
        }
        info!(runs, "Starting batch");
        self.spawn_worker()
    }

    /// Continue a paused batch
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.pause()?;
        {
            let mut search = self.search.lock();
            let requested = search.run_state().runs_requested;
            if search.stats().runs >= requested {
                return Err(Error::InvalidState(format!(
                    "batch of {} runs already finished",
                    requested
                )));
            }
            if search.stats().started_at.is_none() {
                search.stats_mut().mark_started(Utc::now());
            }
        }
        info!("Resuming batch");
        self.spawn_worker()
    }

    /// Stop the worker after its current generation and wait for it to exit
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Result<()> {
        if let Some(worker) = self.worker.take() {
            worker.join()?;
            info!("Search paused");
        }
        self.refresh_snapshot();
        Ok(())
    }

    /// Run exactly one generation on the calling thread
    #[instrument(skip(self))]
    pub fn step(&mut self) -> Result<GenerationOutcome> {
        if self.is_running() {
            return Err(Error::InvalidState(
                "cannot step while the search is running".to_string(),
            ));
        }
        self.pause()?;
        let outcome = self.search.lock().run_generation();
        self.refresh_snapshot();
        Ok(outcome)
    }

    /// Stop, clear all statistics and re-randomise the graph
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.pause()?;
        self.search.lock().reset();
        self.refresh_snapshot();
        info!("Search reset");
        Ok(())
    }

    /// Returns true while the worker is executing generations
    pub fn is_running(&self) -> bool {
        self.worker.is_some() && self.search.lock().run_state().running
    }

    pub fn current_stats(&self) -> RunStats {
        self.search.lock().stats().clone()
    }

    /// The graph as of the last time the search was observed paused
    pub fn current_graph(&mut self) -> &NodeGraph {
        self.refresh_snapshot();
        &self.snapshot.graph
    }

    /// Per-node fitness as of the last time the search was observed paused
    pub fn current_fitness(&mut self) -> &[f64] {
        self.refresh_snapshot();
        &self.snapshot.fitness
    }

    /// List the program computed by node `index` in the current graph
    pub fn program_text(&self, index: usize) -> Result<String> {
        program_text(self.search.lock().graph(), index)
    }

    pub fn best_node(&self) -> usize {
        self.search.lock().best_node()
    }

    /// Shared handle to the underlying search
    pub fn search(&self) -> Arc<Mutex<SearchLoop>> {
        Arc::clone(&self.search)
    }

    fn spawn_worker(&mut self) -> Result<()> {
        self.worker = Some(WorkerHandle::start(Arc::clone(&self.search))?);
        Ok(())
    }

    fn refresh_snapshot(&mut self) {
        let search = self.search.lock();
        if search.run_state().running {
            return;
        }
        self.snapshot.graph.clone_from(search.graph());
        self.snapshot.fitness.clear();
        self.snapshot.fitness.extend_from_slice(search.fitness());
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Err(e) = self.pause() {
            error!("Failed to stop search worker: {}", e);
        }
    }
}
