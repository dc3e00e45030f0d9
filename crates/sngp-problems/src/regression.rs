//! Symbolic regression of 4x^4 - 3x^3 + 2x^2 - x.

use crate::cases::{any_reaches, TestCases};
use sngp_core::{Operation, Value};
use sngp_graph::FitnessProvider;

const SAMPLE_RANGE: std::ops::Range<Value> = -8..8;

fn target(x: Value) -> Value {
    let x2 = x * x;
    let x3 = x * x2;
    let x4 = x * x3;
    4 * x4 - 3 * x3 + 2 * x2 - x
}

/// Sampled at integer x in [-8, 8) with function set {Add, Sub, Mult, Div}.
/// Fitness is the negated absolute error, so a perfect node scores 0.
pub struct SymbolicRegression {
    cases: TestCases,
    ops: Vec<Operation>,
}

impl SymbolicRegression {
    pub fn new() -> Self {
        let mut cases = TestCases::new(1);
        for x in SAMPLE_RANGE {
            cases.push(&[x], target(x));
        }
        Self {
            cases,
            ops: vec![Operation::Add, Operation::Sub, Operation::Mult, Operation::Div],
        }
    }
}

impl Default for SymbolicRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl FitnessProvider for SymbolicRegression {
    fn name(&self) -> &str {
        "symbolic-regression"
    }

    fn num_inputs(&self) -> usize {
        1
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
        -(value as f64 - self.expected_output(test_case) as f64).abs()
    }

    fn has_reached_target(&self, fitness: &[f64]) -> bool {
        any_reaches(fitness, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases() {
        let problem = SymbolicRegression::new();
        assert_eq!(problem.num_test_cases(), 16);
        assert_eq!(problem.inputs(0), &[-8]);
        assert_eq!(problem.expected_output(9), target(1));
        assert_eq!(target(1), 2);
        assert_eq!(target(2), 64 - 24 + 8 - 2);
    }

    #[test]
    fn test_score_is_negative_error() {
        let problem = SymbolicRegression::new();
        let expected = problem.expected_output(3);
        assert_eq!(problem.score(expected, 3), 0.0);
        assert_eq!(problem.score(expected + 5, 3), -5.0);
        assert_eq!(problem.score(expected - 5, 3), -5.0);
        assert!(problem.has_reached_target(&[-40.0, 0.0]));
        assert!(!problem.has_reached_target(&[-40.0, -1.0]));
    }
}
