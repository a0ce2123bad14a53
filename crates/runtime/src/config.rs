//! Tunable parameters of the decision engine.
//!
//! Every threshold the engine consults lives here so it can be tuned from the
//! environment or a config file and pinned in tests.

use game_core::CellContent;
use serde::{Deserialize, Serialize};

/// How the movement planner chooses between equally ranked moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TieBreak {
    /// Uniformly random among the best tier. Escapes symmetric traps.
    #[default]
    Random,
    /// First in `Up, Down, Left, Right` order.
    Ordered,
}

/// Reward scale used by target selection.
///
/// Power-ups are weighted far above plain pellets; contents not listed here
/// are worth nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueTable {
    pub power_pellet: f64,
    pub scavenger: f64,
    pub big_moose_juice: f64,
    pub chameleon_cloak: f64,
    pub pellet: f64,
}

impl ValueTable {
    pub fn value(&self, content: CellContent) -> f64 {
        match content {
            CellContent::PowerPellet => self.power_pellet,
            CellContent::Scavenger => self.scavenger,
            CellContent::BigMooseJuice => self.big_moose_juice,
            CellContent::ChameleonCloak => self.chameleon_cloak,
            CellContent::Pellet => self.pellet,
            CellContent::Empty
            | CellContent::Wall
            | CellContent::ZookeeperSpawn
            | CellContent::AnimalSpawn => 0.0,
        }
    }

    pub fn is_valuable(&self, content: CellContent) -> bool {
        self.value(content) > 0.0
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self {
            power_pellet: 50.0,
            scavenger: 30.0,
            big_moose_juice: 30.0,
            chameleon_cloak: 20.0,
            pellet: 1.0,
        }
    }
}

/// Decision engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Flee when the nearest zookeeper is at most this far away.
    pub flee_threshold: u32,
    /// Manhattan radius marked dangerous around every zookeeper.
    pub danger_radius: u32,
    /// Ticks without progress tolerated before a target is abandoned.
    pub stuck_threshold: u32,
    /// Number of recent positions remembered for loop avoidance.
    pub history_capacity: usize,
    /// Activate a held cloak when a zookeeper is nearer than this.
    pub cloak_trigger_distance: u32,
    /// Pellets nearer than this count towards a value-boost activation.
    pub boost_radius: u32,
    /// A value boost is activated when more than this many pellets are near.
    pub boost_min_pellets: usize,
    /// Floor applied to the distance in the desirability ratio.
    pub distance_floor: f64,
    pub tie_break: TieBreak,
    /// Seed for the tie-break RNG. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub values: ValueTable,
}

impl EngineConfig {
    pub const DEFAULT_FLEE_THRESHOLD: u32 = 4;
    pub const DEFAULT_DANGER_RADIUS: u32 = 3;
    pub const DEFAULT_STUCK_THRESHOLD: u32 = 5;
    pub const DEFAULT_HISTORY_CAPACITY: usize = 4;
    pub const DEFAULT_CLOAK_TRIGGER_DISTANCE: u32 = 5;
    pub const DEFAULT_BOOST_RADIUS: u32 = 6;
    pub const DEFAULT_BOOST_MIN_PELLETS: usize = 5;
    pub const DEFAULT_DISTANCE_FLOOR: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            flee_threshold: Self::DEFAULT_FLEE_THRESHOLD,
            danger_radius: Self::DEFAULT_DANGER_RADIUS,
            stuck_threshold: Self::DEFAULT_STUCK_THRESHOLD,
            history_capacity: Self::DEFAULT_HISTORY_CAPACITY,
            cloak_trigger_distance: Self::DEFAULT_CLOAK_TRIGGER_DISTANCE,
            boost_radius: Self::DEFAULT_BOOST_RADIUS,
            boost_min_pellets: Self::DEFAULT_BOOST_MIN_PELLETS,
            distance_floor: Self::DEFAULT_DISTANCE_FLOOR,
            tie_break: TieBreak::default(),
            rng_seed: None,
            values: ValueTable::default(),
        }
    }

    pub fn with_flee_threshold(mut self, flee_threshold: u32) -> Self {
        self.flee_threshold = flee_threshold;
        self
    }

    pub fn with_danger_radius(mut self, danger_radius: u32) -> Self {
        self.danger_radius = danger_radius;
        self
    }

    pub fn with_stuck_threshold(mut self, stuck_threshold: u32) -> Self {
        self.stuck_threshold = stuck_threshold;
        self
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_values(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_ups_outrank_pellets() {
        let values = ValueTable::default();
        let pellet = values.value(CellContent::Pellet);
        let cloak = values.value(CellContent::ChameleonCloak);
        let scavenger = values.value(CellContent::Scavenger);
        let power = values.value(CellContent::PowerPellet);

        assert!(pellet > 0.0);
        assert!(cloak > pellet);
        assert!(scavenger > cloak);
        assert_eq!(scavenger, values.value(CellContent::BigMooseJuice));
        assert!(power > scavenger);
        assert!(!values.is_valuable(CellContent::AnimalSpawn));
    }

    #[test]
    fn partial_config_files_keep_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "stuck_threshold": 8, "tie_break": "ordered" }"#).unwrap();

        assert_eq!(config.stuck_threshold, 8);
        assert_eq!(config.tie_break, TieBreak::Ordered);
        assert_eq!(config.flee_threshold, EngineConfig::DEFAULT_FLEE_THRESHOLD);
        assert_eq!(config.values, ValueTable::default());
    }

    #[test]
    fn tie_break_parses_case_insensitively() {
        assert_eq!("Ordered".parse::<TieBreak>(), Ok(TieBreak::Ordered));
        assert_eq!("RANDOM".parse::<TieBreak>(), Ok(TieBreak::Random));
        assert!("coin-flip".parse::<TieBreak>().is_err());
    }
}
