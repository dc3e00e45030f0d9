//! Fitness provider interface and per-test-case value storage.

use crate::dirty::DirtySet;
use crate::engine::EvalEngine;
use sngp_core::{Operation, Value};

/// Supplies test cases for a target input/output mapping and scores node outputs.
///
/// Per-node fitness is the sum of `score` over all test cases, in test case
/// order, so re-scoring only some nodes yields the same values as a full pass.
pub trait FitnessProvider: Send {
    /// Short human-readable name
    fn name(&self) -> &str;

    fn num_inputs(&self) -> usize;

    fn num_test_cases(&self) -> usize;

    /// Values for the input slots of the given test case
    fn inputs(&self, test_case: usize) -> &[Value];

    fn expected_output(&self, test_case: usize) -> Value;

    /// Operations random function nodes may be built from
    fn allowed_operations(&self) -> &[Operation];

    /// Fitness contribution of one node output for one test case
    fn score(&self, value: Value, test_case: usize) -> f64;

    /// Returns true if any node is a solution
    fn has_reached_target(&self, fitness: &[f64]) -> bool;

    /// Fitness of a single node summed over all test cases
    fn node_fitness(&self, table: &CaseTable, node: usize) -> f64 {
        table
            .rows()
            .iter()
            .enumerate()
            .map(|(test_case, row)| self.score(row[node], test_case))
            .sum()
    }

    /// Re-score every node
    fn evaluate(&self, table: &CaseTable, fitness: &mut [f64]) {
        for (node, slot) in fitness.iter_mut().enumerate() {
            *slot = self.node_fitness(table, node);
        }
    }

    /// Re-score only the given nodes, leaving the others untouched
    fn evaluate_dirty(&self, table: &CaseTable, dirty: &DirtySet, fitness: &mut [f64]) {
        for node in dirty.iter() {
            fitness[node] = self.node_fitness(table, node);
        }
    }
}

/// Node values for every test case: one row per test case, one column per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    rows: Vec<Vec<Value>>,
}

impl CaseTable {
    /// Allocate rows for a graph of `size` nodes with the input slots filled in
    pub fn new(provider: &dyn FitnessProvider, size: usize) -> Self {
        let rows = (0..provider.num_test_cases())
            .map(|test_case| {
                let mut row = vec![0; size];
                let inputs = provider.inputs(test_case);
                row[..inputs.len()].copy_from_slice(inputs);
                row
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, test_case: usize) -> &[Value] {
        &self.rows[test_case]
    }

    pub fn num_cases(&self) -> usize {
        self.rows.len()
    }

    /// Fully evaluate the graph for every test case
    pub fn eval_all(&mut self, engine: &EvalEngine) {
        for row in &mut self.rows {
            engine.eval_all(row);
        }
    }

    /// Re-evaluate the engine's changed nodes for every test case
    pub fn eval_changed(&mut self, engine: &EvalEngine) {
        for row in &mut self.rows {
            engine.eval_changed(row);
        }
    }
}
