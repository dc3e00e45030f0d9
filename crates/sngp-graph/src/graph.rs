//! Fixed-size node graph holding one candidate program.

use crate::validation::validate_graph;
use serde::{Deserialize, Serialize};
use sngp_core::{Node, Result};

/// Ordered, fixed-size sequence of nodes.
///
/// Indices `[0, num_inputs)` are input slots; indices `[num_inputs, size)` are
/// function nodes whose operands only reference lower indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    num_inputs: usize,
}

impl NodeGraph {
    /// Create a graph of `size` nodes: input slots followed by `NoOp` nodes
    pub fn new(size: usize, num_inputs: usize) -> Self {
        let nodes = (0..size)
            .map(|i| if i < num_inputs { Node::input() } else { Node::noop() })
            .collect();
        Self { nodes, num_inputs }
    }

    /// Build a graph from explicit function nodes placed after the input slots
    pub fn from_functions(num_inputs: usize, functions: Vec<Node>) -> Result<Self> {
        let mut nodes = vec![Node::input(); num_inputs];
        nodes.extend(functions);
        let graph = Self { nodes, num_inputs };
        validate_graph(&graph)?;
        Ok(graph)
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Index of the first function node
    pub fn first_function(&self) -> usize {
        self.num_inputs
    }

    pub fn num_functions(&self) -> usize {
        self.size().saturating_sub(self.num_inputs)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    pub(crate) fn set_node(&mut self, index: usize, node: Node) {
        self.nodes[index] = node;
    }

    pub fn is_input(&self, index: usize) -> bool {
        index < self.num_inputs
    }
}
