//! Mutation operators for node graphs.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use sngp_core::{MutationConfig, Node, Operation, Value};

/// The node state saved before the last mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMutation {
    pub index: usize,
    pub previous: Node,
}

/// What a single perturbation did to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing observable changed
    None,
    /// A `Const` literal was replaced
    Literal { old: Value, new: Value },
    /// Operand `slot` was rewired from node `old` to node `new`
    Rewire { slot: usize, old: usize, new: usize },
}

pub struct Mutator {
    config: MutationConfig,
}

impl Mutator {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Generate a random function node for position `index`.
    ///
    /// Operands are drawn from `[0, index)`. A node with no predecessors can only
    /// hold an operation that references nothing; it falls back to `NoOp` when
    /// `ops` offers none.
    pub fn random_node(&self, index: usize, ops: &[Operation], rng: &mut ChaCha8Rng) -> Node {
        let candidates: Vec<Operation> = ops
            .iter()
            .copied()
            .filter(|op| *op != Operation::Input)
            .filter(|op| index > 0 || !op.references_nodes())
            .collect();

        let op = match candidates.choose(rng) {
            Some(op) => *op,
            None => return Node::noop(),
        };

        match op {
            Operation::Const => Node::constant(self.random_literal(rng)),
            _ if op.references_nodes() => {
                let mut operands = [0; 3];
                for operand in operands.iter_mut().take(op.arity()) {
                    *operand = rng.gen_range(0..index) as i32;
                }
                Node::new(op, operands)
            }
            _ => Node::new(op, [0; 3]),
        }
    }

    /// Perturb the node at `index` in place without changing its operation
    pub fn perturb(&self, index: usize, node: &mut Node, rng: &mut ChaCha8Rng) -> Change {
        if node.op == Operation::Const {
            let old = node.operands[0];
            let new = self.random_literal(rng);
            node.operands[0] = new;
            return if old == new {
                Change::None
            } else {
                Change::Literal { old, new }
            };
        }

        if !node.op.references_nodes() || index == 0 {
            return Change::None;
        }

        let slot = rng.gen_range(0..node.arity());
        let old = node.operands[slot] as usize;
        let new = self.random_target(index, old, rng);
        node.operands[slot] = new as i32;

        if old == new {
            Change::None
        } else {
            Change::Rewire { slot, old, new }
        }
    }

    fn random_literal(&self, rng: &mut ChaCha8Rng) -> Value {
        rng.gen_range(0..=self.config.max_const)
    }

    /// Draw a new operand target in `[0, index)`, skipping `current` if configured
    fn random_target(&self, index: usize, current: usize, rng: &mut ChaCha8Rng) -> usize {
        if self.config.avoid_current_target && index > 1 && current < index {
            let target = rng.gen_range(0..index - 1);
            if target >= current {
                target + 1
            } else {
                target
            }
        } else {
            rng.gen_range(0..index)
        }
    }
}
