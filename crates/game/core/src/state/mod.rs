//! Per-tick world snapshot.
//!
//! The transport builds a fresh [`GameState`] for every tick. Consumers treat
//! it as read-only and must not rely on anything but coordinate and id
//! equality across ticks.
pub mod error;
pub mod grid;
pub mod types;

pub use error::{SnapshotError, UnknownContent};
pub use grid::Grid;
pub use types::{
    ActivePowerUp, AgentId, Animal, Cell, CellContent, Position, PowerUpKind, Tick, Zookeeper,
};

/// Immutable snapshot of the board and every agent on it.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub tick: Tick,
    pub grid: Grid,
    pub animals: Vec<Animal>,
    pub zookeepers: Vec<Zookeeper>,
}

impl GameState {
    /// Validates the cell list and assembles a snapshot.
    pub fn new<I>(
        tick: Tick,
        cells: I,
        animals: Vec<Animal>,
        zookeepers: Vec<Zookeeper>,
    ) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = Cell>,
    {
        Ok(Self {
            tick,
            grid: Grid::from_cells(cells)?,
            animals,
            zookeepers,
        })
    }

    /// Looks an animal up by id.
    pub fn animal(&self, id: &AgentId) -> Option<&Animal> {
        self.animals.iter().find(|animal| &animal.id == id)
    }

    /// Nearest zookeeper to `position` and its Manhattan distance.
    ///
    /// Ties keep the zookeeper listed first.
    pub fn nearest_zookeeper(&self, position: Position) -> Option<(&Zookeeper, u32)> {
        self.zookeepers
            .iter()
            .map(|keeper| (keeper, keeper.position.manhattan_distance(position)))
            .min_by_key(|(_, distance)| *distance)
    }
}
