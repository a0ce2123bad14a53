//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the engine and worker modules can stay focused on decisions and plumbing.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::{BotHandle, EngineStatus};
pub use providers::{CommandProvider, IdleCommandProvider};
