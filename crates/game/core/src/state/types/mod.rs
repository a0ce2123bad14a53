pub mod agents;
pub mod cell;
pub mod common;

pub use agents::{ActivePowerUp, Animal, PowerUpKind, Zookeeper};
pub use cell::{Cell, CellContent};
pub use common::{AgentId, Position, Tick};
