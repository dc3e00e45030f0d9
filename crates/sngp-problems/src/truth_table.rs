//! Arbitrary boolean target functions.

use crate::cases::{any_reaches, exact_match, TestCases};
use sngp_core::{Operation, Value};
use sngp_graph::FitnessProvider;

/// Exhaustive truth table for a caller-supplied boolean function
pub struct TruthTable {
    name: String,
    cases: TestCases,
    ops: Vec<Operation>,
}

impl TruthTable {
    pub fn new(
        name: impl Into<String>,
        inputs: usize,
        ops: Vec<Operation>,
        target: impl Fn(&[Value]) -> Value,
    ) -> Self {
        Self {
            name: name.into(),
            cases: TestCases::exhaustive_bits(inputs, target),
            ops,
        }
    }

    /// Two-input AND with function set {And}
    pub fn and2() -> Self {
        Self::new("and-2", 2, vec![Operation::And], |bits| bits[0] & bits[1])
    }
}

impl FitnessProvider for TruthTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_inputs(&self) -> usize {
        self.cases.num_inputs()
    }

    fn num_test_cases(&self) -> usize {
        self.cases.len()
    }

    fn inputs(&self, test_case: usize) -> &[Value] {
        self.cases.inputs(test_case)
    }

    fn expected_output(&self, test_case: usize) -> Value {
        self.cases.output(test_case)
    }

    fn allowed_operations(&self) -> &[Operation] {
        &self.ops
    }

    fn score(&self, value: Value, test_case: usize) -> f64 {
        exact_match(value, self.expected_output(test_case))
    }

    fn has_reached_target(&self, fitness: &[f64]) -> bool {
        any_reaches(fitness, self.num_test_cases() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sngp_core::{MutationConfig, Node};
    use sngp_graph::{CaseTable, EvalEngine, NodeGraph};

    #[test]
    fn test_and_node_scores_maximum() {
        let problem = TruthTable::and2();
        let graph = NodeGraph::from_functions(
            2,
            vec![Node::binary(Operation::And, 0, 1), Node::binary(Operation::And, 0, 0)],
        )
        .unwrap();
        let engine = EvalEngine::from_graph(graph, problem.ops.clone(), MutationConfig::default());
        let mut table = CaseTable::new(&problem, engine.size());
        table.eval_all(&engine);

        let mut fitness = vec![0.0; engine.size()];
        problem.evaluate(&table, &mut fitness);

        assert_eq!(fitness[2], 4.0);
        assert_eq!(fitness[3], 3.0);
        assert!(problem.has_reached_target(&fitness));
    }

    #[test]
    fn test_xor_table() {
        let xor = TruthTable::new("xor", 2, vec![Operation::Nand], |b| b[0] ^ b[1]);
        let outputs: Vec<Value> = (0..4).map(|c| xor.expected_output(c)).collect();
        assert_eq!(outputs, vec![0, 1, 1, 0]);
    }
}
