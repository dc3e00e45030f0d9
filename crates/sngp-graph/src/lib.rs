//! Node graph representation and incremental evaluation.
//!
//! A candidate program is a fixed-size array of nodes. Nodes only read from
//! lower indices, so a single forward pass evaluates the whole graph. The
//! engine keeps a reverse dependency index so that one mutation can be
//! re-scored by re-evaluating only the nodes downstream of it:
//! - Mutation-friendly: every mutation preserves acyclicity
//! - Undoable: exactly one pending mutation can be restored
//! - Incremental: the dirty set is the mutated node plus its transitive dependents

pub mod graph;
pub mod eval;
pub mod links;
pub mod dirty;
pub mod mutation;
pub mod engine;
pub mod fitness;
pub mod listing;
pub mod validation;

pub use graph::NodeGraph;
pub use eval::{apply, evaluate_node};
pub use links::DependencyIndex;
pub use dirty::DirtySet;
pub use mutation::{Change, Mutator, PendingMutation};
pub use engine::EvalEngine;
pub use fitness::{CaseTable, FitnessProvider};
pub use listing::{graph_listing, program_text};
pub use validation::{validate_graph, verify_links};
