//! Per-tick bot output.
//!
//! A [`BotCommand`] carries exactly one [`Action`]. Wire values outside the
//! known range decode to [`Action::Idle`], which the server treats as "do
//! nothing this tick".

/// The four cardinal moves, in tie-break enumeration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Coordinate delta in screen space (Up decreases `y`).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Bot action with its server wire code.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::FromRepr, strum::Display,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum Action {
    /// No-op.
    #[default]
    Idle = 0,
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
    UseItem = 5,
}

impl Action {
    pub fn is_move(self) -> bool {
        self.direction().is_some()
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Idle | Action::UseItem => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Action::Up,
            Direction::Down => Action::Down,
            Direction::Left => Action::Left,
            Direction::Right => Action::Right,
        }
    }
}

impl From<u8> for Action {
    fn from(code: u8) -> Self {
        Action::from_repr(code).unwrap_or(Action::Idle)
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        action as u8
    }
}

/// The single artifact the bot produces per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotCommand {
    pub action: Action,
}

impl BotCommand {
    /// Returned whenever no meaningful decision can be made.
    pub const DEFAULT: Self = Self {
        action: Action::Idle,
    };

    pub const fn new(action: Action) -> Self {
        Self { action }
    }

    pub const fn use_item() -> Self {
        Self::new(Action::UseItem)
    }
}

impl From<Direction> for BotCommand {
    fn from(direction: Direction) -> Self {
        Self::new(direction.into())
    }
}
