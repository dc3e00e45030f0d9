//! Reverse dependency index.

use crate::graph::NodeGraph;

/// For each node, the multiset of nodes that read it as an operand.
///
/// A node appears once per operand slot pointing at the target, so two slots
/// wired to the same source are two entries.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    dependents: Vec<Vec<usize>>,
}

impl DependencyIndex {
    /// Build the index from scratch by scanning every function node
    pub fn build(graph: &NodeGraph) -> Self {
        let mut index = Self {
            dependents: vec![Vec::new(); graph.size()],
        };
        for i in graph.first_function()..graph.size() {
            for target in graph.node(i).references() {
                index.link(i, target);
            }
        }
        index
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    /// Nodes that read `index`, with multiplicity
    pub fn dependents(&self, index: usize) -> &[usize] {
        &self.dependents[index]
    }

    /// Record one operand slot of `node` pointing at `target`
    pub fn link(&mut self, node: usize, target: usize) {
        self.dependents[target].push(node);
    }

    /// Remove one occurrence of `node` from the dependents of `target`
    pub fn unlink(&mut self, node: usize, target: usize) -> bool {
        let list = &mut self.dependents[target];
        match list.iter().position(|&d| d == node) {
            Some(pos) => {
                list.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Move one operand link of `node` from `old` to `new`
    pub fn switch(&mut self, node: usize, old: usize, new: usize) {
        if old == new {
            return;
        }
        self.unlink(node, old);
        self.link(node, new);
    }

    /// Multiset equality with another index
    pub fn matches(&self, other: &DependencyIndex) -> bool {
        self.len() == other.len()
            && self
                .dependents
                .iter()
                .zip(&other.dependents)
                .all(|(a, b)| sorted(a) == sorted(b))
    }
}

impl PartialEq for DependencyIndex {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for DependencyIndex {}

fn sorted(list: &[usize]) -> Vec<usize> {
    let mut list = list.to_vec();
    list.sort_unstable();
    list
}
