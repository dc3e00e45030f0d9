//! Structural checks for node graphs.

use crate::graph::NodeGraph;
use crate::links::DependencyIndex;
use sngp_core::{Error, Operation, Result};

/// Validate that a graph is well-formed: input slots hold `Input`, function
/// nodes do not, and every operand reference points strictly backwards.
pub fn validate_graph(graph: &NodeGraph) -> Result<()> {
    for (i, node) in graph.nodes().iter().enumerate() {
        if graph.is_input(i) {
            if node.op != Operation::Input {
                return Err(Error::Validation(format!(
                    "Input slot {} holds {}",
                    i, node.op
                )));
            }
            continue;
        }

        if node.op == Operation::Input {
            return Err(Error::Validation(format!(
                "Function node {} holds an Input operation",
                i
            )));
        }

        let count = if node.op.references_nodes() { node.arity() } else { 0 };
        for (slot, &operand) in node.operands[..count].iter().enumerate() {
            if operand < 0 || operand as usize >= i {
                return Err(Error::Validation(format!(
                    "Node {} operand {} references {}, outside [0, {})",
                    i, slot, operand, i
                )));
            }
        }
    }
    Ok(())
}

/// Returns true if `links` equals a from-scratch rebuild for `graph`
pub fn verify_links(graph: &NodeGraph, links: &DependencyIndex) -> bool {
    links.matches(&DependencyIndex::build(graph))
}
