//! Generation-by-generation hill climber.

use crate::state::RunState;
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sngp_core::{Result, RunId, RunStats, SearchConfig};
use sngp_graph::{CaseTable, EvalEngine, FitnessProvider, NodeGraph};
use tracing::{debug, info, instrument, trace};

/// What one generation did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Generation number that was executed
    pub generation: u64,
    /// The previous mutation was undone before mutating again
    pub restored: bool,
    /// Node mutated in this generation
    pub mutated: Option<usize>,
    /// Number of nodes re-evaluated
    pub evaluated: usize,
    /// Total score after the generation
    pub score: f64,
}

/// Result of advancing the search by one generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEvent {
    /// The current run keeps going
    Continue(GenerationOutcome),
    /// A run ended and a new one was started
    RunCompleted { hit: bool },
    /// The last requested run ended
    Finished { hit: bool },
}

/// One candidate graph evolved against one fitness provider.
///
/// Generation 0 of each run fully evaluates a freshly randomised graph. Later
/// generations undo the previous mutation if it lowered the total score, then
/// always apply a new mutation and re-score only the nodes it affected.
pub struct SearchLoop {
    provider: Box<dyn FitnessProvider>,
    config: SearchConfig,
    engine: EvalEngine,
    table: CaseTable,
    fitness: Vec<f64>,
    stats: RunStats,
    state: RunState,
    rng: ChaCha8Rng,
    run_id: RunId,
}

impl SearchLoop {
    pub fn new(provider: Box<dyn FitnessProvider>, config: SearchConfig) -> Result<Self> {
        config.validate(provider.num_inputs())?;

        let size = config.graph.size;
        let engine = EvalEngine::new(
            size,
            provider.num_inputs(),
            provider.allowed_operations().to_vec(),
            config.mutation.clone(),
        );
        let table = CaseTable::new(provider.as_ref(), size);
        let state = RunState::new(config.runs);

        let mut search = Self {
            provider,
            config,
            engine,
            table,
            fitness: vec![0.0; size],
            stats: RunStats::new(),
            state,
            rng: ChaCha8Rng::seed_from_u64(0),
            run_id: RunId::new(),
        };
        search.start_run();
        Ok(search)
    }

    pub fn provider(&self) -> &dyn FitnessProvider {
        self.provider.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn engine(&self) -> &EvalEngine {
        &self.engine
    }

    pub fn graph(&self) -> &NodeGraph {
        self.engine.graph()
    }

    /// Per-node fitness of the current generation
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Per-test-case node values of the current generation
    pub fn table(&self) -> &CaseTable {
        &self.table
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    pub fn run_state(&self) -> &RunState {
        &self.state
    }

    pub fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns true if the current graph contains a solution
    pub fn has_reached_target(&self) -> bool {
        self.provider.has_reached_target(&self.fitness)
    }

    /// Index of the highest-scoring node (the first one on ties)
    pub fn best_node(&self) -> usize {
        best_index(&self.fitness)
    }

    /// Clear all statistics and start over with a freshly randomised graph
    pub fn reset(&mut self) {
        self.stats.reset();
        self.start_run();
    }

    /// Begin a new run: reseed, re-randomise the graph and rewind to generation 0
    pub fn start_run(&mut self) {
        let run_index = self.stats.runs;
        self.rng = match self.config.run_seed(run_index) {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.run_id = RunId::new();
        self.engine.init(&mut self.rng);
        self.stats.generation = 0;
        debug!(run_id = %self.run_id, run_index, "Started run");
    }

    /// Execute one generation without any run accounting
    pub fn run_generation(&mut self) -> GenerationOutcome {
        let generation = self.stats.generation;
        let outcome = if generation == 0 {
            self.cold_start()
        } else {
            self.steady_state()
        };
        self.stats.generation += 1;
        trace!(
            generation,
            restored = outcome.restored,
            evaluated = outcome.evaluated,
            score = outcome.score,
            "Generation complete"
        );
        outcome
    }

    /// Execute one generation and handle the end of a run
    #[instrument(level = "trace", skip(self), fields(run_id = %self.run_id))]
    pub fn advance(&mut self) -> RunEvent {
        let outcome = self.run_generation();

        let hit = self.has_reached_target();
        if !hit && self.stats.generation < self.config.max_generations {
            return RunEvent::Continue(outcome);
        }

        self.stats.finish_run(hit);
        info!(
            run_id = %self.run_id,
            hit,
            generations = self.stats.generation,
            best_individual = self.stats.best_individual_score,
            hits = self.stats.hits,
            runs = self.stats.runs,
            "Run finished"
        );

        if self.stats.runs >= self.state.runs_requested {
            self.state.running = false;
            self.stats.mark_finished(Utc::now());
            info!(
                hits = self.stats.hits,
                runs = self.stats.runs,
                elapsed_ms = self.stats.elapsed_ms(),
                "All requested runs finished"
            );
            RunEvent::Finished { hit }
        } else {
            self.start_run();
            RunEvent::RunCompleted { hit }
        }
    }

    fn cold_start(&mut self) -> GenerationOutcome {
        self.table.eval_all(&self.engine);
        self.engine.clear_changed();
        self.provider.evaluate(&self.table, &mut self.fitness);

        let (total, best) = self.totals();
        self.stats.record_cold_start(total, best);

        GenerationOutcome {
            generation: 0,
            restored: false,
            mutated: None,
            evaluated: self.engine.size(),
            score: total,
        }
    }

    fn steady_state(&mut self) -> GenerationOutcome {
        let restored = self.stats.regressed();
        if restored {
            self.engine.restore();
            self.stats.revert_score();
        }

        let mutated = self.engine.mutate(&mut self.rng);
        self.table.eval_changed(&self.engine);
        self.provider
            .evaluate_dirty(&self.table, self.engine.changed_nodes(), &mut self.fitness);
        let evaluated = self.engine.changed_nodes().len();
        self.engine.clear_changed();

        let (total, best) = self.totals();
        self.stats.record_generation(total, best);

        GenerationOutcome {
            generation: self.stats.generation,
            restored,
            mutated,
            evaluated,
            score: total,
        }
    }

    fn totals(&self) -> (f64, f64) {
        let total = self.fitness.iter().sum();
        let best = self.fitness[best_index(&self.fitness)];
        (total, best)
    }
}

fn best_index(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate() {
        if f > fitness[best] {
            best = i;
        }
    }
    best
}
