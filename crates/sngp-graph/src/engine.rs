//! Incremental evaluation engine with single-step undo.

use crate::dirty::DirtySet;
use crate::eval::evaluate_node;
use crate::graph::NodeGraph;
use crate::links::DependencyIndex;
use crate::mutation::{Change, Mutator, PendingMutation};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use sngp_core::{MutationConfig, Node, Operation, Value};
use tracing::{debug, trace};

/// Owns one candidate graph together with its dependency index, the set of
/// nodes changed since the last evaluation, and the pending mutation.
pub struct EvalEngine {
    graph: NodeGraph,
    links: DependencyIndex,
    changed: DirtySet,
    mutator: Mutator,
    ops: Vec<Operation>,
    pending: Option<PendingMutation>,
}

impl EvalEngine {
    /// Create an engine over a graph of `NoOp` function nodes; call `init` to randomise
    pub fn new(size: usize, num_inputs: usize, ops: Vec<Operation>, config: MutationConfig) -> Self {
        Self::from_graph(NodeGraph::new(size, num_inputs), ops, config)
    }

    /// Wrap an existing graph
    pub fn from_graph(graph: NodeGraph, ops: Vec<Operation>, config: MutationConfig) -> Self {
        let links = DependencyIndex::build(&graph);
        Self {
            graph,
            links,
            changed: DirtySet::new(),
            mutator: Mutator::new(config),
            ops,
            pending: None,
        }
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn size(&self) -> usize {
        self.graph.size()
    }

    pub fn num_inputs(&self) -> usize {
        self.graph.num_inputs()
    }

    pub fn links(&self) -> &DependencyIndex {
        &self.links
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn pending(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    /// Nodes changed by `mutate`/`restore` since the last `clear_changed`,
    /// including everything downstream of them
    pub fn changed_nodes(&self) -> &DirtySet {
        &self.changed
    }

    /// Re-randomise every function node and rebuild the dependency index
    pub fn init(&mut self, rng: &mut ChaCha8Rng) {
        for i in self.graph.first_function()..self.graph.size() {
            let node = self.mutator.random_node(i, &self.ops, rng);
            self.graph.set_node(i, node);
        }
        self.generate_links();
        self.changed.clear();
        self.pending = None;
    }

    /// Rebuild the dependency index from the current graph
    pub fn generate_links(&mut self) {
        self.links = DependencyIndex::build(&self.graph);
    }

    /// Evaluate a single node against a fully populated value array
    pub fn evaluate_node(&self, index: usize, values: &[Value]) -> Value {
        evaluate_node(self.graph.node(index), index, values)
    }

    /// Evaluate every function node in index order
    pub fn eval_all(&self, values: &mut [Value]) {
        debug_assert_eq!(values.len(), self.graph.size());
        for i in self.graph.first_function()..self.graph.size() {
            values[i] = self.evaluate_node(i, values);
        }
    }

    /// Re-evaluate only the changed nodes, in index order
    pub fn eval_changed(&self, values: &mut [Value]) {
        debug_assert_eq!(values.len(), self.graph.size());
        for i in self.changed.iter() {
            values[i] = self.evaluate_node(i, values);
        }
    }

    /// Forget the changed-node set; call after every evaluation pass
    pub fn clear_changed(&mut self) {
        self.changed.clear();
    }

    /// Mutate one uniformly chosen function node, replacing the pending mutation.
    ///
    /// Returns the mutated index, or `None` if the graph has no function nodes.
    pub fn mutate(&mut self, rng: &mut ChaCha8Rng) -> Option<usize> {
        if self.graph.num_functions() == 0 {
            self.pending = None;
            return None;
        }
        let index = rng.gen_range(self.graph.first_function()..self.graph.size());
        self.mutate_node(index, rng);
        Some(index)
    }

    /// Mutate the function node at `index`, replacing the pending mutation
    pub fn mutate_node(&mut self, index: usize, rng: &mut ChaCha8Rng) -> Change {
        assert!(
            index >= self.graph.first_function() && index < self.graph.size(),
            "node {} is not a function node",
            index
        );
        let previous = *self.graph.node(index);
        self.pending = Some(PendingMutation { index, previous });

        let change = self.mutator.perturb(index, self.graph.node_mut(index), rng);
        match change {
            Change::None => {}
            Change::Literal { .. } => self.mark_changed(index),
            Change::Rewire { old, new, .. } => self.switch_link(index, old, new),
        }
        trace!(index, ?change, "Mutated node");
        change
    }

    /// Undo the pending mutation.
    ///
    /// Returns false, and does nothing, when there is no pending mutation or it
    /// changed nothing.
    pub fn restore(&mut self) -> bool {
        let PendingMutation { index, previous } = match self.pending.take() {
            Some(pending) => pending,
            None => return false,
        };

        let current = *self.graph.node(index);
        if current == previous {
            return false;
        }

        self.graph.set_node(index, previous);
        if previous.op.references_nodes() {
            let slots = current.references().zip(previous.references());
            for (now, before) in slots {
                if now != before {
                    self.links.switch(index, now, before);
                }
            }
        }
        self.mark_changed(index);
        debug_assert!(self.links.matches(&DependencyIndex::build(&self.graph)));
        debug!(index, restored = %previous, "Restored node");
        true
    }

    fn switch_link(&mut self, index: usize, old: usize, new: usize) {
        self.links.switch(index, old, new);
        self.mark_changed(index);
    }

    fn mark_changed(&mut self, index: usize) {
        self.changed.mark(index, &self.links);
    }
}
