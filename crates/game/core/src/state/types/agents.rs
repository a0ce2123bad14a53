use super::{AgentId, Position};

/// Power-up types an animal can hold or have active.
///
/// `Other` keeps codes this build does not know about so a newer server does
/// not break decoding; such power-ups are never activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8", into = "u8")
)]
pub enum PowerUpKind {
    PowerPellet,
    ChameleonCloak,
    Scavenger,
    BigMooseJuice,
    Other(u8),
}

impl PowerUpKind {
    pub fn code(self) -> u8 {
        match self {
            PowerUpKind::PowerPellet => 0,
            PowerUpKind::ChameleonCloak => 1,
            PowerUpKind::Scavenger => 2,
            PowerUpKind::BigMooseJuice => 3,
            PowerUpKind::Other(code) => code,
        }
    }
}

impl From<u8> for PowerUpKind {
    fn from(code: u8) -> Self {
        match code {
            0 => PowerUpKind::PowerPellet,
            1 => PowerUpKind::ChameleonCloak,
            2 => PowerUpKind::Scavenger,
            3 => PowerUpKind::BigMooseJuice,
            other => PowerUpKind::Other(other),
        }
    }
}

impl From<PowerUpKind> for u8 {
    fn from(kind: PowerUpKind) -> Self {
        kind.code()
    }
}

/// A power-up currently in effect on an animal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub ticks_remaining: u32,
    /// Effect magnitude (score multiplier, collection radius, ...).
    pub value: f64,
}

impl ActivePowerUp {
    pub fn new(kind: PowerUpKind, ticks_remaining: u32, value: f64) -> Self {
        Self {
            kind,
            ticks_remaining,
            value,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ticks_remaining > 0
    }
}

/// Collectible-gathering agent. One of them is the bot itself.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animal {
    pub id: AgentId,
    pub nickname: String,
    pub position: Position,
    pub spawn: Position,
    pub score: u64,
    pub captured_counter: u32,
    pub distance_covered: u64,
    pub is_viable: bool,
    pub held_power_up: Option<PowerUpKind>,
    pub active_power_up: Option<ActivePowerUp>,
    /// Consecutive pellets collected without a break.
    pub score_streak: u32,
}

impl Animal {
    /// Creates a viable animal with no score, power-ups, or streak.
    pub fn new(id: impl Into<AgentId>, position: Position) -> Self {
        Self {
            id: id.into(),
            nickname: String::new(),
            position,
            spawn: position,
            score: 0,
            captured_counter: 0,
            distance_covered: 0,
            is_viable: true,
            held_power_up: None,
            active_power_up: None,
            score_streak: 0,
        }
    }

    pub fn with_held_power_up(mut self, kind: PowerUpKind) -> Self {
        self.held_power_up = Some(kind);
        self
    }

    pub fn with_active_power_up(mut self, active: ActivePowerUp) -> Self {
        self.active_power_up = Some(active);
        self
    }

    pub fn with_score_streak(mut self, streak: u32) -> Self {
        self.score_streak = streak;
        self
    }

    /// True while a chameleon cloak is in effect.
    pub fn is_cloaked(&self) -> bool {
        self.active_power_up
            .is_some_and(|p| p.kind == PowerUpKind::ChameleonCloak && p.is_active())
    }

    pub fn has_streak(&self) -> bool {
        self.score_streak > 0
    }
}

/// Hostile agent. Only its position matters to the bot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zookeeper {
    pub id: AgentId,
    pub position: Position,
}

impl Zookeeper {
    pub fn new(id: impl Into<AgentId>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}
