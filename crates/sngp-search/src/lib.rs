//! Hill-climbing search over node graphs.
//!
//! `SearchLoop` runs generations against a fitness provider; `SearchSession`
//! drives it from a background worker thread and exposes the foreground
//! controls (start, pause, step, reset) and snapshots.

pub mod state;
pub mod search;
pub mod worker;
pub mod session;

pub use state::RunState;
pub use search::{GenerationOutcome, RunEvent, SearchLoop};
pub use worker::WorkerHandle;
pub use session::SearchSession;
