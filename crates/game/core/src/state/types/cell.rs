use crate::state::error::UnknownContent;

use super::{Position, PowerUpKind};

/// Closed set of things a board cell can hold, keyed by the server wire code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::FromRepr, strum::Display)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum CellContent {
    Empty = 0,
    Wall = 1,
    Pellet = 2,
    ZookeeperSpawn = 3,
    AnimalSpawn = 4,
    PowerPellet = 5,
    ChameleonCloak = 6,
    Scavenger = 7,
    BigMooseJuice = 8,
}

impl CellContent {
    /// Every cell except walls can be stepped on.
    pub fn is_passable(self) -> bool {
        !matches!(self, CellContent::Wall)
    }

    /// Plain score pellet (not a power-up).
    pub fn is_pellet(self) -> bool {
        matches!(self, CellContent::Pellet)
    }

    /// Power-up granted when an animal steps on this cell.
    pub fn power_up(self) -> Option<PowerUpKind> {
        match self {
            CellContent::PowerPellet => Some(PowerUpKind::PowerPellet),
            CellContent::ChameleonCloak => Some(PowerUpKind::ChameleonCloak),
            CellContent::Scavenger => Some(PowerUpKind::Scavenger),
            CellContent::BigMooseJuice => Some(PowerUpKind::BigMooseJuice),
            _ => None,
        }
    }

    /// Anything worth walking to: pellets and power-ups.
    pub fn is_collectible(self) -> bool {
        self.is_pellet() || self.power_up().is_some()
    }
}

impl TryFrom<u8> for CellContent {
    type Error = UnknownContent;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        CellContent::from_repr(code).ok_or(UnknownContent(code))
    }
}

impl From<CellContent> for u8 {
    fn from(content: CellContent) -> Self {
        content as u8
    }
}

/// One board cell as delivered in a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub position: Position,
    pub content: CellContent,
}

impl Cell {
    pub const fn new(position: Position, content: CellContent) -> Self {
        Self { position, content }
    }

    pub const fn at(x: i32, y: i32, content: CellContent) -> Self {
        Self::new(Position::new(x, y), content)
    }
}
