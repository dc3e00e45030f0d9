//! Test case storage shared by the problem catalog.

use sngp_core::Value;

/// Flat table of test cases with a fixed number of inputs each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCases {
    num_inputs: usize,
    inputs: Vec<Value>,
    outputs: Vec<Value>,
}

impl TestCases {
    pub fn new(num_inputs: usize) -> Self {
        Self {
            num_inputs,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Every combination of `num_inputs` bits, most significant input first,
    /// with the output computed by `target`
    pub fn exhaustive_bits(num_inputs: usize, target: impl Fn(&[Value]) -> Value) -> Self {
        let mut cases = Self::new(num_inputs);
        for i in 0..(1usize << num_inputs) {
            let bits: Vec<Value> = (0..num_inputs)
                .map(|j| ((i >> (num_inputs - 1 - j)) & 1) as Value)
                .collect();
            let output = target(&bits);
            cases.push(&bits, output);
        }
        cases
    }

    pub fn push(&mut self, inputs: &[Value], output: Value) {
        assert_eq!(inputs.len(), self.num_inputs, "test case input width mismatch");
        self.inputs.extend_from_slice(inputs);
        self.outputs.push(output);
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn inputs(&self, test_case: usize) -> &[Value] {
        let start = test_case * self.num_inputs;
        &self.inputs[start..start + self.num_inputs]
    }

    pub fn output(&self, test_case: usize) -> Value {
        self.outputs[test_case]
    }
}

/// 1 for an exact match, 0 otherwise
pub(crate) fn exact_match(value: Value, expected: Value) -> f64 {
    if value == expected {
        1.0
    } else {
        0.0
    }
}

/// True if any node scored at least `target` (with a small tolerance)
pub(crate) fn any_reaches(fitness: &[f64], target: f64) -> bool {
    fitness.iter().any(|&f| f >= target - 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustive_bits_order() {
        let cases = TestCases::exhaustive_bits(2, |bits| bits[0] | bits[1]);
        assert_eq!(cases.len(), 4);
        assert_eq!(cases.inputs(0), &[0, 0]);
        assert_eq!(cases.inputs(1), &[0, 1]);
        assert_eq!(cases.inputs(2), &[1, 0]);
        assert_eq!(cases.inputs(3), &[1, 1]);
        assert_eq!(cases.output(0), 0);
        assert_eq!(cases.output(2), 1);
    }

    #[test]
    fn test_push() {
        let mut cases = TestCases::new(1);
        assert!(cases.is_empty());
        cases.push(&[-3], 9);
        assert_eq!(cases.inputs(0), &[-3]);
        assert_eq!(cases.output(0), 9);
    }

    #[test]
    fn test_any_reaches() {
        assert!(any_reaches(&[0.0, 63.95], 64.0));
        assert!(!any_reaches(&[0.0, 63.0], 64.0));
        assert!(any_reaches(&[-5.0, -0.05], 0.0));
    }
}
