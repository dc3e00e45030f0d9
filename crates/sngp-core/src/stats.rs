//! Score and run statistics tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Statistics for the current batch of runs.
///
/// Scores are sums of per-node fitness over the whole graph; the `avg_` prefix
/// is kept for the "population average" reading of a single-node GP graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Total score of the current generation
    pub avg_score: f64,
    /// Total score recorded for the previous generation
    pub last_avg_score: f64,
    /// Best total score seen in this batch
    pub best_score_ever: f64,
    /// Best single-node score of the current generation
    pub best_individual_score: f64,
    /// Best single-node score seen in this batch
    pub best_individual_score_ever: f64,
    /// Generation counter of the current run
    pub generation: u64,
    /// Completed runs that reached the target fitness
    pub hits: usize,
    /// Completed runs
    pub runs: usize,
    /// Wall-clock start of the batch
    pub started_at: Option<DateTime<Utc>>,
    /// Duration of the batch, set once it completes
    pub time_taken_ms: Option<u64>,
    #[serde(default)]
    observed: bool,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all values
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record the fully evaluated score of a freshly randomised graph.
    ///
    /// The first observation after a reset always wins, so negative-valued
    /// fitness functions start from their own baseline instead of zero.
    pub fn record_cold_start(&mut self, total: f64, best_individual: f64) {
        self.avg_score = total;
        self.last_avg_score = total;
        self.best_individual_score = best_individual;
        if !self.observed {
            self.best_score_ever = total;
            self.best_individual_score_ever = best_individual;
            self.observed = true;
        } else {
            self.update_best(total, best_individual);
        }
    }

    /// Record the score of a steady-state generation
    pub fn record_generation(&mut self, total: f64, best_individual: f64) {
        self.last_avg_score = self.avg_score;
        self.avg_score = total;
        self.best_individual_score = best_individual;
        self.update_best(total, best_individual);
    }

    /// Treat the previous generation's score as current after undoing a mutation
    pub fn revert_score(&mut self) {
        self.avg_score = self.last_avg_score;
    }

    /// Returns true when the last generation scored below the one before
    pub fn regressed(&self) -> bool {
        self.avg_score < self.last_avg_score
    }

    /// Count a finished run
    pub fn finish_run(&mut self, hit: bool) {
        self.runs += 1;
        if hit {
            self.hits += 1;
        }
    }

    pub fn mark_started(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.time_taken_ms = None;
    }

    pub fn mark_finished(&mut self, now: DateTime<Utc>) {
        self.time_taken_ms = Some(self.elapsed_until(now));
    }

    /// Batch duration so far, or the final duration once finished
    pub fn elapsed_ms(&self) -> u64 {
        match self.time_taken_ms {
            Some(ms) => ms,
            None => self.elapsed_until(Utc::now()),
        }
    }

    fn elapsed_until(&self, now: DateTime<Utc>) -> u64 {
        self.started_at
            .map(|start| (now - start).num_milliseconds().max(0) as u64)
            .unwrap_or(0)
    }

    fn update_best(&mut self, total: f64, best_individual: f64) {
        if self.best_score_ever < total {
            debug!(previous = self.best_score_ever, total, "New best total score");
            self.best_score_ever = total;
        }
        if self.best_individual_score_ever < best_individual {
            self.best_individual_score_ever = best_individual;
        }
    }
}
