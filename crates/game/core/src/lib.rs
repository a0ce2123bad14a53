//! Snapshot model shared by the decision runtime and the transport.
//!
//! `game-core` defines the board, the agents on it, and the single command a
//! bot emits per tick. Everything here is plain data plus pure queries; the
//! decision logic lives in the `runtime` crate.
pub mod action;
pub mod state;

pub use action::{Action, BotCommand, Direction};
pub use state::{
    ActivePowerUp, AgentId, Animal, Cell, CellContent, GameState, Grid, Position, PowerUpKind,
    SnapshotError, Tick, UnknownContent, Zookeeper,
};
