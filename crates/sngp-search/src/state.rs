//! Run control state shared between the worker and the foreground.

use serde::{Deserialize, Serialize};

/// Whether the worker should keep running generations, and how many runs the
/// current batch asks for. Only read or written under the search lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub running: bool,
    pub runs_requested: usize,
}

impl RunState {
    pub fn new(runs_requested: usize) -> Self {
        Self {
            running: false,
            runs_requested,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(1)
    }
}
