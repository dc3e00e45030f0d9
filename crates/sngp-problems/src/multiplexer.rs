//! 6-multiplexer: two address bits select one of four data bits.

use crate::cases::{any_reaches, exact_match, TestCases};
use sngp_core::{Operation, Value};
use sngp_graph::FitnessProvider;

const ADDRESS_BITS: usize = 2;
const DATA_BITS: usize = 4;

/// Exhaustive over all 64 input combinations, function set {And, Or, Not, If},
/// one point per matching output.
pub struct Multiplexer {
    cases: TestCases,
    ops: Vec<Operation>,
}

impl Multiplexer {
    pub fn new() -> Self {
        let cases = TestCases::exhaustive_bits(ADDRESS_BITS + DATA_BITS, |bits| {
            let address = ((bits[0] << 1) | bits[1]) as usize;
            bits[ADDRESS_BITS + address]
        });
        Self {
            cases,
            ops: vec![Operation::And, Operation::Or, Operation::Not, Operation::If],
        }
    }
}

impl Default for Multiplexer {
    fn default() -> Self {
        Self::new()
    }
}

impl FitnessProvider for Multiplexer {
    fn name(&self) -> &str {
        "multiplexer-6"
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
