//! Decision runtime for a Zooscape bot.
//!
//! This crate turns one [`game_core::GameState`] snapshot into one
//! [`game_core::BotCommand`]. The rule-based engine lives in
//! [`providers::ai`]; the runtime hosts it on a worker task so a transport can
//! drive it through a cloneable [`BotHandle`].
//!
//! Modules are organized by responsibility:
//! - [`config`] holds every tunable threshold and the value table
//! - [`providers`] hosts the decision engine and its stages
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod config;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{
    BotHandle, CommandProvider, EngineStatus, IdleCommandProvider, Result, RuntimeError,
};
pub use config::{EngineConfig, TieBreak, ValueTable};
pub use providers::ai::{
    DecisionEngine, DecisionObserver, DecisionTrace, NoopObserver, Stage, TracingObserver,
};
pub use runtime::{BotRuntime, RuntimeBuilder, RuntimeConfig};
