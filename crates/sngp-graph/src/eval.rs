//! Evaluation rules for node operations.

use sngp_core::{Node, Operation, Value};

fn truth(v: bool) -> Value {
    v as Value
}

/// Apply `op` to its operand values.
///
/// Arithmetic wraps on overflow and division by zero yields 0. Operands beyond
/// the operation's arity are ignored.
pub fn apply(op: Operation, a: Value, b: Value, c: Value) -> Value {
    match op {
        Operation::NoOp | Operation::Input | Operation::Const => 0,
        Operation::Identity => truth(a != 0),
        Operation::Not => truth(a == 0),
        Operation::Add => a.wrapping_add(b),
        Operation::Sub => a.wrapping_sub(b),
        Operation::Mult => a.wrapping_mul(b),
        Operation::Div => {
            if b == 0 {
                0
            } else {
                a.wrapping_div(b)
            }
        }
        Operation::Or => truth(a != 0 || b != 0),
        Operation::Nor => truth(!(a != 0 || b != 0)),
        Operation::And => truth(a != 0 && b != 0),
        Operation::Nand => truth(!(a != 0 && b != 0)),
        Operation::Greater => truth(a > b),
        Operation::Less => truth(a < b),
        Operation::Equal => truth(a == b),
        Operation::If => {
            if a != 0 {
                b
            } else {
                c
            }
        }
    }
}

/// Evaluate the node stored at `index` against a fully populated value array.
///
/// Input slots return their current value unchanged; `Const` returns its literal.
pub fn evaluate_node(node: &Node, index: usize, values: &[Value]) -> Value {
    match node.op {
        Operation::NoOp => 0,
        Operation::Input => values[index],
        Operation::Const => node.operands[0],
        op => {
            let mut args = [0; 3];
            for (slot, target) in node.references().enumerate() {
                args[slot] = values[target];
            }
            apply(op, args[0], args[1], args[2])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply(Operation::Add, 3, 4, 0), 7);
        assert_eq!(apply(Operation::Sub, 3, 4, 0), -1);
        assert_eq!(apply(Operation::Mult, -3, 4, 0), -12);
        assert_eq!(apply(Operation::Div, 9, 2, 0), 4);
        assert_eq!(apply(Operation::Add, Value::MAX, 1, 0), Value::MIN);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(apply(Operation::Div, 9, 0, 0), 0);
        assert_eq!(apply(Operation::Div, Value::MIN, -1, 0), Value::MIN);
    }

    #[test]
    fn test_logic() {
        assert_eq!(apply(Operation::And, 1, 5, 0), 1);
        assert_eq!(apply(Operation::And, 1, 0, 0), 0);
        assert_eq!(apply(Operation::Nand, 1, 1, 0), 0);
        assert_eq!(apply(Operation::Or, 0, 0, 0), 0);
        assert_eq!(apply(Operation::Nor, 0, 0, 0), 1);
        assert_eq!(apply(Operation::Not, 0, 0, 0), 1);
        assert_eq!(apply(Operation::Not, 7, 0, 0), 0);
        assert_eq!(apply(Operation::Identity, 7, 0, 0), 1);
    }

    #[test]
    fn test_comparison_and_select() {
        assert_eq!(apply(Operation::Greater, 2, 1, 0), 1);
        assert_eq!(apply(Operation::Less, 2, 1, 0), 0);
        assert_eq!(apply(Operation::Equal, 2, 2, 0), 1);
        assert_eq!(apply(Operation::If, 1, 10, 20), 10);
        assert_eq!(apply(Operation::If, 0, 10, 20), 20);
    }

    #[test]
    fn test_evaluate_node() {
        let values = [6, 3, 0];
        assert_eq!(evaluate_node(&Node::input(), 1, &values), 3);
        assert_eq!(evaluate_node(&Node::constant(42), 2, &values), 42);
        assert_eq!(evaluate_node(&Node::binary(Operation::Div, 0, 1), 2, &values), 2);
        assert_eq!(evaluate_node(&Node::noop(), 2, &values), 0);
    }
}
