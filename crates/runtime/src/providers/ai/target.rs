//! Target selection and persistence.
//!
//! The tracker owns the only cross-tick target state: the pursued coordinate,
//! the stuck counter and the invalidated set. Coordinates are stored by value
//! and re-resolved against each new snapshot.
//!
//! # State machine
//!
//! ```text
//! NoTarget --(eligible candidate)--> Pursuing
//! Pursuing --(agent on target)-----> NoTarget
//! Pursuing --(cell lost its value)-> NoTarget
//! Pursuing --(stuck > threshold)---> NoTarget + invalidate
//! ```
//!
//! An invalidated coordinate stays ineligible until its content is observed
//! without value and then valuable again (a collectible reappeared there).

use std::collections::HashMap;

use game_core::{CellContent, Position};

use super::AiContext;

/// What happened to the target during one update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetOutcome {
    /// No target before or after the update.
    Idle,
    /// A new target was chosen this tick.
    Selected(Position),
    /// The existing target is still being pursued.
    Pursuing(Position),
    /// The agent stood on the target; a replacement may have been selected.
    Reached {
        reached: Position,
        next: Option<Position>,
    },
    /// The target cell lost its value before the agent arrived.
    Vanished {
        vanished: Position,
        next: Option<Position>,
    },
    /// The stuck counter exceeded its threshold; the target was invalidated.
    Abandoned {
        abandoned: Position,
        next: Option<Position>,
    },
}

impl TargetOutcome {
    /// Target to steer towards after the update.
    pub fn current(self) -> Option<Position> {
        match self {
            TargetOutcome::Idle => None,
            TargetOutcome::Selected(target) | TargetOutcome::Pursuing(target) => Some(target),
            TargetOutcome::Reached { next, .. }
            | TargetOutcome::Vanished { next, .. }
            | TargetOutcome::Abandoned { next, .. } => next,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Invalidation {
    /// Set once the cell has been seen holding nothing of value.
    vacated: bool,
}

/// Value-to-distance ratio used to rank candidate cells.
pub fn desirability(value: f64, distance: u32, floor: f64) -> f64 {
    value / f64::from(distance).max(floor)
}

#[derive(Clone, Debug, Default)]
pub struct TargetTracker {
    target: Option<Position>,
    stuck_ticks: u32,
    last_distance: Option<u32>,
    invalidated: HashMap<Position, Invalidation>,
}

impl TargetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    pub fn stuck_ticks(&self) -> u32 {
        self.stuck_ticks
    }

    pub fn is_invalidated(&self, position: Position) -> bool {
        self.invalidated.contains_key(&position)
    }

    pub fn invalidated(&self) -> impl Iterator<Item = Position> + '_ {
        self.invalidated.keys().copied()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the state machine against the current snapshot.
    pub fn update(&mut self, ctx: &AiContext) -> TargetOutcome {
        self.release_invalidations(ctx);

        let Some(target) = self.target else {
            return match self.select_and_pursue(ctx) {
                Some(next) => TargetOutcome::Selected(next),
                None => TargetOutcome::Idle,
            };
        };

        if ctx.position() == target {
            self.clear();
            let next = self.select_and_pursue(ctx);
            return TargetOutcome::Reached {
                reached: target,
                next,
            };
        }

        if !self.is_valuable(ctx, target) {
            self.clear();
            let next = self.select_and_pursue(ctx);
            return TargetOutcome::Vanished {
                vanished: target,
                next,
            };
        }

        let distance = ctx.distance_to(target);
        if self.last_distance.is_some_and(|last| distance < last) {
            self.stuck_ticks = 0;
        } else {
            self.stuck_ticks = self.stuck_ticks.saturating_add(1);
        }
        self.last_distance = Some(distance);

        if self.stuck_ticks > ctx.config.stuck_threshold {
            tracing::debug!(
                position = %target,
                stuck = self.stuck_ticks,
                "abandoning target"
            );
            self.invalidated
                .insert(target, Invalidation { vacated: false });
            self.clear();
            let next = self.select_and_pursue(ctx);
            return TargetOutcome::Abandoned {
                abandoned: target,
                next,
            };
        }

        TargetOutcome::Pursuing(target)
    }

    /// Best eligible cell, without touching tracker state.
    ///
    /// With an active score streak the nearest plain pellet wins; otherwise
    /// the highest desirability does. Ties go to the shorter distance and
    /// then to row-major order.
    pub fn select(&self, ctx: &AiContext) -> Option<Position> {
        if ctx.agent.has_streak() {
            let nearest_pellet = self
                .candidates(ctx)
                .filter(|(_, content, _)| *content == CellContent::Pellet)
                .min_by_key(|(position, _, distance)| (*distance, position.y, position.x));
            if let Some((position, _, _)) = nearest_pellet {
                return Some(position);
            }
        }

        let floor = ctx.config.distance_floor;
        let mut best: Option<(Position, f64, u32)> = None;
        for (position, content, distance) in self.candidates(ctx) {
            let score = desirability(ctx.config.values.value(content), distance, floor);
            let better = match best {
                None => true,
                Some((_, best_score, best_distance)) => {
                    score > best_score || (score == best_score && distance < best_distance)
                }
            };
            if better {
                best = Some((position, score, distance));
            }
        }
        best.map(|(position, _, _)| position)
    }

    fn candidates<'c>(
        &'c self,
        ctx: &'c AiContext,
    ) -> impl Iterator<Item = (Position, CellContent, u32)> + 'c {
        let origin = ctx.position();
        ctx.grid()
            .iter()
            .filter(move |cell| cell.position != origin)
            .filter(move |cell| ctx.config.values.is_valuable(cell.content))
            .filter(move |cell| !self.invalidated.contains_key(&cell.position))
            .map(move |cell| {
                (
                    cell.position,
                    cell.content,
                    origin.manhattan_distance(cell.position),
                )
            })
    }

    fn select_and_pursue(&mut self, ctx: &AiContext) -> Option<Position> {
        let next = self.select(ctx)?;
        self.target = Some(next);
        self.stuck_ticks = 0;
        self.last_distance = Some(ctx.distance_to(next));
        Some(next)
    }

    fn release_invalidations(&mut self, ctx: &AiContext) {
        let values = &ctx.config.values;
        let grid = ctx.grid();
        self.invalidated.retain(|position, invalidation| {
            let valuable = grid
                .content(*position)
                .is_some_and(|content| values.is_valuable(content));
            if !valuable {
                invalidation.vacated = true;
                return true;
            }
            !invalidation.vacated
        });
    }

    fn is_valuable(&self, ctx: &AiContext, position: Position) -> bool {
        ctx.grid()
            .content(position)
            .is_some_and(|content| ctx.config.values.is_valuable(content))
    }

    fn clear(&mut self) {
        self.target = None;
        self.stuck_ticks = 0;
        self.last_distance = None;
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Animal, Cell, GameState, Tick};

    use super::*;
    use crate::config::EngineConfig;

    fn snapshot(
        width: i32,
        height: i32,
        items: &[(i32, i32, CellContent)],
        agent: Animal,
    ) -> GameState {
        let cells: Vec<Cell> = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    let content = items
                        .iter()
                        .find(|(ix, iy, _)| (*ix, *iy) == (x, y))
                        .map_or(CellContent::Empty, |(_, _, content)| *content);
                    Cell::at(x, y, content)
                })
            })
            .collect();
        GameState::new(Tick(0), cells, vec![agent], Vec::new()).unwrap()
    }

    fn update(tracker: &mut TargetTracker, state: &GameState) -> TargetOutcome {
        let config = EngineConfig::default();
        tracker.update(&AiContext::new(&state.animals[0], state, &config))
    }

    #[test]
    fn desirability_floors_zero_distance() {
        assert_eq!(desirability(1.0, 0, 0.1), 10.0);
        assert_eq!(desirability(50.0, 10, 0.1), 5.0);
    }

    #[test]
    fn far_power_pellet_beats_near_pellet() {
        let state = snapshot(
            12,
            1,
            &[(1, 0, CellContent::Pellet), (10, 0, CellContent::PowerPellet)],
            Animal::new("me", Position::ORIGIN),
        );
        let mut tracker = TargetTracker::new();

        assert_eq!(
            update(&mut tracker, &state),
            TargetOutcome::Selected(Position::new(10, 0))
        );
    }

    #[test]
    fn streak_prefers_nearest_pellet() {
        let state = snapshot(
            12,
            1,
            &[(3, 0, CellContent::Pellet), (10, 0, CellContent::PowerPellet)],
            Animal::new("me", Position::ORIGIN).with_score_streak(2),
        );
        let mut tracker = TargetTracker::new();

        assert_eq!(update(&mut tracker, &state).current(), Some(Position::new(3, 0)));
    }

    #[test]
    fn equal_candidates_resolve_in_row_major_order() {
        let state = snapshot(
            5,
            5,
            &[(2, 3, CellContent::Pellet), (3, 2, CellContent::Pellet)],
            Animal::new("me", Position::new(2, 2)),
        );
        let tracker = TargetTracker::new();
        let config = EngineConfig::default();
        let ctx = AiContext::new(&state.animals[0], &state, &config);

        assert_eq!(tracker.select(&ctx), Some(Position::new(3, 2)));
    }

    #[test]
    fn own_cell_is_never_a_candidate() {
        let state = snapshot(
            3,
            1,
            &[(0, 0, CellContent::Pellet)],
            Animal::new("me", Position::ORIGIN),
        );
        let mut tracker = TargetTracker::new();
        assert_eq!(update(&mut tracker, &state), TargetOutcome::Idle);
    }

    #[test]
    fn vanished_target_is_dropped_without_invalidation() {
        let agent = Animal::new("me", Position::ORIGIN);
        let before = snapshot(6, 1, &[(4, 0, CellContent::Pellet)], agent.clone());
        let after = snapshot(6, 1, &[], agent);
        let mut tracker = TargetTracker::new();

        update(&mut tracker, &before);
        assert_eq!(
            update(&mut tracker, &after),
            TargetOutcome::Vanished {
                vanished: Position::new(4, 0),
                next: None
            }
        );
        assert!(!tracker.is_invalidated(Position::new(4, 0)));
    }

    #[test]
    fn stuck_target_is_invalidated_after_threshold() {
        let state = snapshot(
            8,
            1,
            &[(7, 0, CellContent::PowerPellet), (3, 0, CellContent::Pellet)],
            Animal::new("me", Position::ORIGIN),
        );
        let mut tracker = TargetTracker::new();
        assert_eq!(
            update(&mut tracker, &state),
            TargetOutcome::Selected(Position::new(7, 0))
        );

        for expected in 1..=5 {
            assert_eq!(
                update(&mut tracker, &state),
                TargetOutcome::Pursuing(Position::new(7, 0))
            );
            assert_eq!(tracker.stuck_ticks(), expected);
        }

        assert_eq!(
            update(&mut tracker, &state),
            TargetOutcome::Abandoned {
                abandoned: Position::new(7, 0),
                next: Some(Position::new(3, 0)),
            }
        );
        assert!(tracker.is_invalidated(Position::new(7, 0)));
        assert_eq!(tracker.stuck_ticks(), 0);
    }

    #[test]
    fn invalidation_lifts_only_after_respawn() {
        let agent = Animal::new("me", Position::ORIGIN);
        let present = snapshot(4, 1, &[(3, 0, CellContent::Pellet)], agent.clone());
        let eaten = snapshot(4, 1, &[], agent);
        let target = Position::new(3, 0);

        let mut tracker = TargetTracker::new();
        tracker
            .invalidated
            .insert(target, Invalidation { vacated: false });

        assert_eq!(update(&mut tracker, &present), TargetOutcome::Idle);
        assert!(tracker.is_invalidated(target));

        assert_eq!(update(&mut tracker, &eaten), TargetOutcome::Idle);
        assert!(tracker.is_invalidated(target));

        assert_eq!(update(&mut tracker, &present), TargetOutcome::Selected(target));
        assert!(!tracker.is_invalidated(target));
    }

    #[test]
    fn progress_resets_the_stuck_counter() {
        let pellet = [(5, 0, CellContent::Pellet)];
        let mut tracker = TargetTracker::new();

        update(&mut tracker, &snapshot(6, 1, &pellet, Animal::new("me", Position::ORIGIN)));
        update(&mut tracker, &snapshot(6, 1, &pellet, Animal::new("me", Position::ORIGIN)));
        assert_eq!(tracker.stuck_ticks(), 1);

        update(&mut tracker, &snapshot(6, 1, &pellet, Animal::new("me", Position::new(1, 0))));
        assert_eq!(tracker.stuck_ticks(), 0);
    }
}
