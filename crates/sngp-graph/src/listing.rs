//! Human-readable dumps of a graph.

use crate::graph::NodeGraph;
use sngp_core::{Error, Operation, Result};
use std::collections::HashMap;

/// List the program computed by node `index`.
///
/// Only nodes reachable from `index` through operand references are printed.
/// They are renumbered densely in evaluation order; each line shows the new
/// index, the original index in parentheses, and the node with remapped operands.
pub fn program_text(graph: &NodeGraph, index: usize) -> Result<String> {
    if index >= graph.size() {
        return Err(Error::NodeOutOfRange {
            index,
            size: graph.size(),
        });
    }

    let mut reachable = vec![false; index + 1];
    reachable[index] = true;
    for i in (0..=index).rev() {
        if reachable[i] {
            for target in graph.node(i).references() {
                reachable[target] = true;
            }
        }
    }

    let order: Vec<usize> = (0..=index).filter(|&i| reachable[i]).collect();
    let remap: HashMap<usize, usize> = order.iter().enumerate().map(|(new, &old)| (old, new)).collect();

    let mut text = String::new();
    for (new, &old) in order.iter().enumerate() {
        let node = graph.node(old);
        text.push_str(&format!("{} ({}): {}", new, old, node.op));
        match node.op {
            Operation::Const => text.push_str(&format!(" {}", node.operands[0])),
            Operation::Input => text.push_str(&format!(" {}", old)),
            _ => {
                let operands: Vec<String> = node.references().map(|r| remap[&r].to_string()).collect();
                if !operands.is_empty() {
                    text.push_str(&format!(" ({})", operands.join(", ")));
                }
            }
        }
        text.push('\n');
    }
    Ok(text)
}

/// List every node with its fitness, one per line
pub fn graph_listing(graph: &NodeGraph, fitness: &[f64]) -> String {
    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let score = fitness.get(i).copied().unwrap_or(0.0);
            format!("{}: {} score: {}\n", i, node, score)
        })
        .collect()
}
