//! Movement planner and anti-loop guard.
//!
//! Candidates are the passable cardinal moves. They are ranked into tiers and
//! the first non-empty tier wins:
//!
//! 1. safe, not recently visited, closer to the target
//! 2. safe, closer to the target
//! 3. safe, not recently visited
//! 4. safe
//!
//! If every passable move lies in a danger zone, the move farthest from the
//! nearest zookeeper is taken. Only a fully enclosed agent gets no move.

use game_core::{Direction, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{AiContext, DangerZones, PositionHistory};
use crate::config::TieBreak;

#[derive(Clone, Copy, Debug)]
struct Candidate {
    direction: Direction,
    destination: Position,
    safe: bool,
    recent: bool,
    improving: bool,
}

/// Ranked move selection with configurable tie-breaking.
#[derive(Clone, Debug)]
pub struct MovementPlanner {
    tie_break: TieBreak,
    rng: StdRng,
}

impl MovementPlanner {
    pub fn new(tie_break: TieBreak, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { tie_break, rng }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Picks a direction towards `target`, or explores when there is none.
    pub fn plan(
        &mut self,
        ctx: &AiContext,
        target: Option<Position>,
        zones: &DangerZones,
        history: &PositionHistory,
    ) -> Option<Direction> {
        let origin = ctx.position();
        let candidates: Vec<Candidate> = ctx
            .passable_moves()
            .map(|(direction, destination)| Candidate {
                direction,
                destination,
                safe: !zones.contains(destination),
                recent: history.contains(destination),
                improving: target.is_some_and(|target| {
                    destination.manhattan_distance(target) < origin.manhattan_distance(target)
                }),
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let tiers: [fn(&Candidate) -> bool; 4] = [
            |c| c.safe && !c.recent && c.improving,
            |c| c.safe && c.improving,
            |c| c.safe && !c.recent,
            |c| c.safe,
        ];

        for (rank, accepts) in tiers.iter().enumerate() {
            let tier: Vec<Direction> = candidates
                .iter()
                .filter(|candidate| accepts(candidate))
                .map(|candidate| candidate.direction)
                .collect();
            if let Some(direction) = self.pick(&tier) {
                tracing::trace!(tier = rank + 1, %direction, "planned move");
                return Some(direction);
            }
        }

        let fallback = Self::least_exposed(ctx, &candidates);
        tracing::debug!(?fallback, "no safe move, taking least exposed");
        fallback
    }

    fn pick(&mut self, tier: &[Direction]) -> Option<Direction> {
        match self.tie_break {
            TieBreak::Ordered => tier.first().copied(),
            TieBreak::Random => tier.choose(&mut self.rng).copied(),
        }
    }

    fn least_exposed(ctx: &AiContext, candidates: &[Candidate]) -> Option<Direction> {
        let Some((keeper, _)) = ctx.nearest_threat() else {
            return candidates.first().map(|candidate| candidate.direction);
        };

        let mut best: Option<(Direction, u32)> = None;
        for candidate in candidates {
            let distance = candidate.destination.manhattan_distance(keeper.position);
            if best.is_none_or(|(_, best_distance)| distance > best_distance) {
                best = Some((candidate.direction, distance));
            }
        }
        best.map(|(direction, _)| direction)
    }
}
