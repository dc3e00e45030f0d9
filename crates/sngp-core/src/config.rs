//! Configuration types for the search.

use crate::{Error, Result, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Node graph dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Total number of nodes, input slots included
    pub size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { size: 100 }
    }
}

/// Mutation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Upper bound (inclusive) for `Const` literals
    pub max_const: Value,
    /// Exclude the current target when rewiring an operand
    pub avoid_current_target: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            max_const: 1000,
            avoid_current_target: true,
        }
    }
}

/// Search batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of independent runs in a batch
    pub runs: usize,
    /// Generation budget per run
    pub max_generations: u64,
    /// Base seed; run `k` uses `seed + k`. Entropy-seeded when absent.
    pub seed: Option<u64>,
    pub graph: GraphConfig,
    pub mutation: MutationConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            runs: 1,
            max_generations: 25_000,
            seed: None,
            graph: GraphConfig::default(),
            mutation: MutationConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the configuration against a problem with `num_inputs` input slots
    pub fn validate(&self, num_inputs: usize) -> Result<()> {
        if self.graph.size <= num_inputs {
            return Err(Error::Config(format!(
                "graph size {} leaves no function nodes after {} inputs",
                self.graph.size, num_inputs
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::Config("max_generations must be positive".to_string()));
        }
        if self.runs == 0 {
            return Err(Error::Config("runs must be positive".to_string()));
        }
        if self.mutation.max_const < 0 {
            return Err(Error::Config("max_const must not be negative".to_string()));
        }
        Ok(())
    }

    /// Seed for the run with the given index, if the batch is seeded
    pub fn run_seed(&self, run_index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(run_index as u64))
    }
}
