use std::fmt;

use crate::action::Direction;

/// Server-assigned identifier of an agent (animal or zookeeper).
///
/// Identity is compared by value only; snapshots are rebuilt every tick so
/// object identity is never stable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AgentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AgentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discrete grid position expressed in cell coordinates.
///
/// The board uses screen coordinates: `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (`|dx| + |dy|`), the only metric the bot uses.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Position one cell away in `direction`. May leave the board; saturates
    /// at the edges of the coordinate space.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Wraps both axes into `[0, width) x [0, height)`.
    pub fn wrapped(self, width: u32, height: u32) -> Position {
        Position::new(
            self.x.rem_euclid(width as i32),
            self.y.rem_euclid(height as i32),
        )
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Server simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Position::new(2, 7);
        let b = Position::new(-1, 3);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn step_uses_screen_coordinates() {
        let origin = Position::new(5, 5);
        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn extreme_coordinates_saturate() {
        let edge = Position::new(i32::MAX, i32::MIN);
        assert_eq!(edge.step(Direction::Right), edge);
        assert_eq!(edge.step(Direction::Up), edge);
        assert_eq!(edge.step(Direction::Left), Position::new(i32::MAX - 1, i32::MIN));
        assert_eq!(edge.manhattan_distance(Position::new(i32::MIN, i32::MAX)), u32::MAX);
    }

    #[test]
    fn wrapped_folds_negative_and_overflowing_coordinates() {
        assert_eq!(Position::new(-1, 10).wrapped(10, 10), Position::new(9, 0));
        assert_eq!(Position::new(12, -3).wrapped(10, 8), Position::new(2, 5));
    }
}
