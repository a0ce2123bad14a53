//! Per-tick decision diagnostics.
//!
//! The engine reports every decision as a [`DecisionTrace`]. Observers are
//! side channels only; nothing they do can change the chosen command.

use game_core::{Action, Position, Tick};

/// Stage of the priority hierarchy that produced the command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// No agent id has been assigned yet.
    Unassigned,
    /// The assigned agent is not in the snapshot.
    MissingAgent,
    Flee,
    UseItem,
    /// Moving towards a target.
    Pursue,
    /// No eligible target; moving anyway.
    Explore,
    /// No passable neighbour at all.
    Enclosed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTrace {
    pub tick: Tick,
    pub position: Option<Position>,
    pub stage: Stage,
    pub target: Option<Position>,
    pub stuck_ticks: u32,
    pub action: Action,
}

/// Receives one trace per decision.
pub trait DecisionObserver: Send {
    fn observe(&mut self, trace: &DecisionTrace);
}

/// Discards every trace.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {
    fn observe(&mut self, _trace: &DecisionTrace) {}
}

/// Forwards traces to `tracing`, at `warn` for degraded stages.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn observe(&mut self, trace: &DecisionTrace) {
        match trace.stage {
            Stage::MissingAgent | Stage::Enclosed => tracing::warn!(
                tick = %trace.tick,
                stage = %trace.stage,
                position = ?trace.position,
                "degraded decision, sending {}",
                trace.action
            ),
            _ => tracing::debug!(
                tick = %trace.tick,
                stage = %trace.stage,
                position = ?trace.position,
                goal = ?trace.target,
                stuck = trace.stuck_ticks,
                action = %trace.action,
                "decision"
            ),
        }
    }
}

impl<F> DecisionObserver for F
where
    F: FnMut(&DecisionTrace) + Send,
{
    fn observe(&mut self, trace: &DecisionTrace) {
        self(trace)
    }
}
