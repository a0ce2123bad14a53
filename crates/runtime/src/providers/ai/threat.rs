//! Threat model: immediate danger, danger zones, and flee direction.
//!
//! Danger zones treat the board as a torus (coordinates wrap on both axes).
//! Movement itself never wraps; only the danger marking does.

use std::collections::HashSet;

use game_core::{Direction, GameState, Position};

use super::AiContext;

/// True iff the nearest zookeeper is within the flee threshold and the agent
/// is not cloaked.
pub fn is_immediate_danger(ctx: &AiContext) -> bool {
    if ctx.agent.is_cloaked() {
        return false;
    }
    ctx.nearest_threat()
        .is_some_and(|(_, distance)| distance <= ctx.config.flee_threshold)
}

/// Cells within a Manhattan radius of any zookeeper, wrapped onto the board.
///
/// Zookeepers reported off the board mark nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DangerZones {
    cells: HashSet<Position>,
}

impl DangerZones {
    /// Marks every coordinate within `radius` of each zookeeper.
    pub fn compute(state: &GameState, radius: u32) -> Self {
        let width = state.grid.width();
        let height = state.grid.height();
        // a diamond wider than the board already covers all of it
        let r = radius.min(width.saturating_add(height)).min(i32::MAX as u32) as i32;

        let mut cells = HashSet::new();
        for keeper in &state.zookeepers {
            if !state.grid.contains(keeper.position) {
                continue;
            }
            let center = keeper.position;
            for dx in -r..=r {
                let span = r - dx.abs();
                for dy in -span..=span {
                    let marked =
                        Position::new(center.x.saturating_add(dx), center.y.saturating_add(dy));
                    cells.insert(marked.wrapped(width, height));
                }
            }
        }

        Self { cells }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Passable move maximizing Manhattan distance from `threat`.
///
/// Ties keep enumeration order (`Up, Down, Left, Right`). Returns `None` when
/// every neighbour is a wall or off the board, in which case the caller falls
/// back to general movement planning.
pub fn best_flee_direction(ctx: &AiContext, threat: Position) -> Option<Direction> {
    let mut best: Option<(Direction, u32)> = None;
    for (direction, destination) in ctx.passable_moves() {
        let distance = destination.manhattan_distance(threat);
        // strict comparison keeps the earliest direction on ties
        if best.is_none_or(|(_, best_distance)| distance > best_distance) {
            best = Some((direction, distance));
        }
    }
    best.map(|(direction, _)| direction)
}

#[cfg(test)]
mod tests {
    use game_core::{ActivePowerUp, Animal, Cell, CellContent, PowerUpKind, Tick, Zookeeper};

    use super::*;
    use crate::config::EngineConfig;

    fn state_with(
        width: i32,
        height: i32,
        walls: &[(i32, i32)],
        agent: Animal,
        keepers: &[(i32, i32)],
    ) -> GameState {
        let cells = (0..height).flat_map(|y| {
            (0..width).map(move |x| {
                let content = if walls.contains(&(x, y)) {
                    CellContent::Wall
                } else {
                    CellContent::Empty
                };
                Cell::at(x, y, content)
            })
        });
        let zookeepers = keepers
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Zookeeper::new(format!("zk{i}"), Position::new(x, y)))
            .collect();
        GameState::new(Tick(1), cells.collect::<Vec<_>>(), vec![agent], zookeepers).unwrap()
    }

    #[test]
    fn danger_starts_at_the_flee_threshold() {
        let config = EngineConfig::default();
        let agent = Animal::new("me", Position::new(5, 5));

        let near = state_with(12, 12, &[], agent.clone(), &[(5, 9)]);
        assert!(is_immediate_danger(&AiContext::new(&near.animals[0], &near, &config)));

        let far = state_with(12, 12, &[], agent, &[(5, 10)]);
        assert!(!is_immediate_danger(&AiContext::new(&far.animals[0], &far, &config)));
    }

    #[test]
    fn cloak_suppresses_danger() {
        let config = EngineConfig::default();
        let agent = Animal::new("me", Position::new(5, 5)).with_active_power_up(
            ActivePowerUp::new(PowerUpKind::ChameleonCloak, 10, 1.0),
        );
        let state = state_with(12, 12, &[], agent, &[(5, 6)]);
        assert!(!is_immediate_danger(&AiContext::new(&state.animals[0], &state, &config)));
    }

    #[test]
    fn no_zookeepers_means_no_danger() {
        let config = EngineConfig::default();
        let state = state_with(5, 5, &[], Animal::new("me", Position::ORIGIN), &[]);
        let ctx = AiContext::new(&state.animals[0], &state, &config);
        assert!(!is_immediate_danger(&ctx));
        assert!(DangerZones::compute(&state, 3).is_empty());
    }

    #[test]
    fn danger_zone_is_a_diamond() {
        let state = state_with(20, 20, &[], Animal::new("me", Position::ORIGIN), &[(10, 10)]);
        let zones = DangerZones::compute(&state, 3);

        // 2r^2 + 2r + 1 cells
        assert_eq!(zones.len(), 25);
        assert!(zones.contains(Position::new(13, 10)));
        assert!(zones.contains(Position::new(11, 12)));
        assert!(!zones.contains(Position::new(12, 12)));
    }

    #[test]
    fn danger_zone_wraps_around_board_edges() {
        let state = state_with(10, 10, &[], Animal::new("me", Position::ORIGIN), &[(0, 0)]);
        let zones = DangerZones::compute(&state, 3);

        assert!(zones.contains(Position::new(9, 0)));
        assert!(zones.contains(Position::new(0, 7)));
        assert!(zones.contains(Position::new(9, 8)));
        assert!(!zones.contains(Position::new(8, 8)));
    }

    #[test]
    fn off_board_keepers_mark_nothing() {
        let state = state_with(
            6,
            6,
            &[],
            Animal::new("me", Position::ORIGIN),
            &[(i32::MAX, i32::MIN), (40, 2)],
        );
        assert!(DangerZones::compute(&state, 3).is_empty());

        let huge = state_with(4, 4, &[], Animal::new("me", Position::ORIGIN), &[(1, 1)]);
        assert_eq!(DangerZones::compute(&huge, u32::MAX).len(), 16);
    }

    #[test]
    fn flees_up_when_hostile_is_directly_below() {
        let config = EngineConfig::default();
        let state = state_with(11, 11, &[], Animal::new("me", Position::new(5, 5)), &[(5, 6)]);
        let ctx = AiContext::new(&state.animals[0], &state, &config);

        assert_eq!(
            best_flee_direction(&ctx, Position::new(5, 6)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn flee_skips_walls() {
        let config = EngineConfig::default();
        let state = state_with(
            11,
            11,
            &[(5, 4)],
            Animal::new("me", Position::new(5, 5)),
            &[(5, 6)],
        );
        let ctx = AiContext::new(&state.animals[0], &state, &config);

        assert_eq!(
            best_flee_direction(&ctx, Position::new(5, 6)),
            Some(Direction::Left)
        );
    }

    #[test]
    fn boxed_in_agent_has_no_flee_move() {
        let config = EngineConfig::default();
        let state = state_with(
            3,
            3,
            &[(1, 0), (0, 1), (2, 1), (1, 2)],
            Animal::new("me", Position::new(1, 1)),
            &[(0, 0)],
        );
        let ctx = AiContext::new(&state.animals[0], &state, &config);

        assert_eq!(best_flee_direction(&ctx, Position::ORIGIN), None);
    }
}
