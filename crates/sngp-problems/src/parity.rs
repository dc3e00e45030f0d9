//! Even parity over N boolean inputs.

use crate::cases::{any_reaches, exact_match, TestCases};
use sngp_core::{Operation, Value};
use sngp_graph::FitnessProvider;

/// Output follows the low bit of the number of set inputs. Exhaustive over
/// all 2^N combinations with function set {And, Or, Nand, Nor}.
pub struct EvenParity {
    name: String,
    cases: TestCases,
    ops: Vec<Operation>,
}

impl EvenParity {
    pub fn new(inputs: usize) -> Self {
        let cases = TestCases::exhaustive_bits(inputs, |bits| bits.iter().sum::<Value>() & 1);
        Self {
            name: format!("even-parity-{}", inputs),
            cases,
            ops: vec![Operation::And, Operation::Or, Operation::Nand, Operation::Nor],
        }
    }
}

impl FitnessProvider for EvenParity {
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
