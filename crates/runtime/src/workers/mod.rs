//! Worker tasks that back the runtime orchestration.
//!
//! The decision worker owns the engine and answers commands one at a time.

mod decision;

pub use decision::{Command, DecisionWorker};
