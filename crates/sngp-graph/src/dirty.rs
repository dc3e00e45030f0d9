//! Set of nodes whose cached value is stale.

use crate::links::DependencyIndex;
use std::collections::BTreeSet;

/// Stale nodes, kept in ascending index order so that re-evaluating them in
/// iteration order always sees fresh operand values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtySet {
    nodes: BTreeSet<usize>,
}

impl DirtySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` and everything that transitively reads it
    pub fn mark(&mut self, index: usize, links: &DependencyIndex) {
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            if self.nodes.insert(i) {
                stack.extend_from_slice(links.dependents(i));
            }
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.nodes.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
