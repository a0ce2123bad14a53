//! Per-tick decision context.
//!
//! [`AiContext`] bundles the controlled animal, the snapshot it was found in,
//! and the engine configuration so every stage of the decision reads the
//! same view of the world.

use game_core::{Animal, Direction, GameState, Grid, Position, Zookeeper};

use crate::config::EngineConfig;

/// Read-only blackboard shared by the threat model, power-up policy, target
/// selection and movement planner for a single tick.
///
/// The `'a` lifetime ties the context to the snapshot; nothing here survives
/// the tick.
pub struct AiContext<'a> {
    /// The animal the bot controls.
    pub agent: &'a Animal,

    /// Snapshot the decision is made against.
    pub state: &'a GameState,

    pub config: &'a EngineConfig,
}

impl<'a> AiContext<'a> {
    pub fn new(agent: &'a Animal, state: &'a GameState, config: &'a EngineConfig) -> Self {
        Self {
            agent,
            state,
            config,
        }
    }

    pub fn position(&self) -> Position {
        self.agent.position
    }

    pub fn grid(&self) -> &'a Grid {
        &self.state.grid
    }

    /// Nearest zookeeper and its Manhattan distance to the agent.
    pub fn nearest_threat(&self) -> Option<(&'a Zookeeper, u32)> {
        self.state.nearest_zookeeper(self.agent.position)
    }

    pub fn distance_to(&self, position: Position) -> u32 {
        self.agent.position.manhattan_distance(position)
    }

    /// Cardinal moves landing on an in-bounds, non-wall cell, in enumeration
    /// order.
    pub fn passable_moves(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        let origin = self.agent.position;
        let grid = self.grid();
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, origin.step(direction)))
            .filter(move |(_, destination)| grid.is_passable(*destination))
    }
}
