//! Core type definitions for node graphs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Runtime value produced by a node
pub type Value = i32;

/// Maximum number of operands a node can carry
pub const MAX_OPERANDS: usize = 3;

/// Unique identifier for one logical search run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    NoOp,
    Input,
    Const,

    // Unary
    Identity,
    Not,

    // Arithmetic
    Add,
    Sub,
    Mult,
    Div,

    // Logical
    Or,
    Nor,
    And,
    Nand,

    // Comparison
    Greater,
    Less,
    Equal,

    // Select
    If,
}

impl Operation {
    pub fn all() -> [Operation; 17] {
        [
            Operation::NoOp,
            Operation::Input,
            Operation::Const,
            Operation::Identity,
            Operation::Not,
            Operation::Add,
            Operation::Sub,
            Operation::Mult,
            Operation::Div,
            Operation::Or,
            Operation::Nor,
            Operation::And,
            Operation::Nand,
            Operation::Greater,
            Operation::Less,
            Operation::Equal,
            Operation::If,
        ]
    }

    /// Returns the number of operands this operation uses
    pub fn arity(&self) -> usize {
        match self {
            Operation::NoOp | Operation::Input => 0,
            Operation::Const | Operation::Identity | Operation::Not => 1,
            Operation::Add | Operation::Sub | Operation::Mult | Operation::Div => 2,
            Operation::Or | Operation::Nor | Operation::And | Operation::Nand => 2,
            Operation::Greater | Operation::Less | Operation::Equal => 2,
            Operation::If => 3,
        }
    }

    /// Returns true if the operands are indices of other nodes.
    ///
    /// `Const` carries a literal in its first operand, so it references nothing.
    pub fn references_nodes(&self) -> bool {
        !matches!(self, Operation::NoOp | Operation::Input | Operation::Const)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::NoOp => "Nop",
            Operation::Input => "Input",
            Operation::Const => "Const",
            Operation::Identity => "Identity",
            Operation::Not => "Not",
            Operation::Add => "Add",
            Operation::Sub => "Sub",
            Operation::Mult => "Mult",
            Operation::Div => "Div",
            Operation::Or => "Or",
            Operation::Nor => "Nor",
            Operation::And => "And",
            Operation::Nand => "Nand",
            Operation::Greater => "Greater",
            Operation::Less => "Less",
            Operation::Equal => "Equal",
            Operation::If => "If",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::all()
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::Config(format!("unknown operation '{}'", s)))
    }
}

/// A single program element: an operation plus up to three operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub op: Operation,
    pub operands: [i32; MAX_OPERANDS],
}

impl Node {
    pub fn new(op: Operation, operands: [i32; MAX_OPERANDS]) -> Self {
        Self { op, operands }
    }

    pub fn noop() -> Self {
        Self::new(Operation::NoOp, [0; MAX_OPERANDS])
    }

    pub fn input() -> Self {
        Self::new(Operation::Input, [0; MAX_OPERANDS])
    }

    pub fn constant(value: Value) -> Self {
        Self::new(Operation::Const, [value, 0, 0])
    }

    pub fn unary(op: Operation, a: usize) -> Self {
        Self::new(op, [a as i32, 0, 0])
    }

    pub fn binary(op: Operation, a: usize, b: usize) -> Self {
        Self::new(op, [a as i32, b as i32, 0])
    }

    pub fn ternary(op: Operation, a: usize, b: usize, c: usize) -> Self {
        Self::new(op, [a as i32, b as i32, c as i32])
    }

    pub fn arity(&self) -> usize {
        self.op.arity()
    }

    /// Literal value of a `Const` node
    pub fn literal(&self) -> Option<Value> {
        match self.op {
            Operation::Const => Some(self.operands[0]),
            _ => None,
        }
    }

    /// Indices of the nodes this node reads, one entry per operand slot
    pub fn references(&self) -> impl Iterator<Item = usize> + '_ {
        let count = if self.op.references_nodes() {
            self.arity()
        } else {
            0
        };
        self.operands[..count].iter().map(|&p| p as usize)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(value) = self.literal() {
            return write!(f, " {}", value);
        }
        let mut refs = self.references().peekable();
        if refs.peek().is_some() {
            let joined: Vec<String> = refs.map(|r| r.to_string()).collect();
            write!(f, " ({})", joined.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_arity() {
        assert_eq!(Operation::NoOp.arity(), 0);
        assert_eq!(Operation::Input.arity(), 0);
        assert_eq!(Operation::Const.arity(), 1);
        assert_eq!(Operation::Not.arity(), 1);
        assert_eq!(Operation::Div.arity(), 2);
        assert_eq!(Operation::If.arity(), 3);
    }

    #[test]
    fn test_references() {
        let node = Node::ternary(Operation::If, 0, 1, 1);
        assert_eq!(node.references().collect::<Vec<_>>(), vec![0, 1, 1]);

        let node = Node::constant(7);
        assert_eq!(node.references().count(), 0);
        assert_eq!(node.literal(), Some(7));

        assert_eq!(Node::input().references().count(), 0);
    }

    #[test]
    fn test_node_display() {
        assert_eq!(Node::binary(Operation::And, 0, 1).to_string(), "And (0, 1)");
        assert_eq!(Node::constant(42).to_string(), "Const 42");
        assert_eq!(Node::input().to_string(), "Input");
        assert_eq!(Node::unary(Operation::Not, 3).to_string(), "Not (3)");
    }

    #[test]
    fn test_operation_from_str() {
        assert_eq!("nand".parse::<Operation>().unwrap(), Operation::Nand);
        assert_eq!("If".parse::<Operation>().unwrap(), Operation::If);
        assert!("xor".parse::<Operation>().is_err());
    }
}
