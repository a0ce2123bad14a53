//! Decision orchestrator.
//!
//! [`DecisionEngine`] owns every piece of cross-tick state and composes the
//! threat model, power-up policy, target tracker and movement planner into a
//! fixed priority order. `decide` takes `&mut self`, so two ticks can never
//! interleave on the same engine.

use game_core::{AgentId, BotCommand, GameState, Position, PowerUpKind};

use super::{
    AiContext, DangerZones, DecisionObserver, DecisionTrace, MovementPlanner, NoopObserver,
    PositionHistory, Stage, TargetTracker, power_up, threat,
};
use crate::config::EngineConfig;

pub struct DecisionEngine {
    config: EngineConfig,
    agent_id: Option<AgentId>,
    tracker: TargetTracker,
    history: PositionHistory,
    planner: MovementPlanner,
    observer: Box<dyn DecisionObserver>,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        let history = PositionHistory::new(config.history_capacity);
        let planner = MovementPlanner::new(config.tie_break, config.rng_seed);
        Self {
            config,
            agent_id: None,
            tracker: TargetTracker::new(),
            history,
            planner,
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl DecisionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn DecisionObserver>) {
        self.observer = observer;
    }

    /// Binds the engine to the animal it controls.
    ///
    /// Binding a different id discards all state gathered for the previous
    /// one; re-binding the same id is a no-op.
    pub fn assign(&mut self, id: impl Into<AgentId>) {
        let id = id.into();
        if self.agent_id.as_ref() == Some(&id) {
            return;
        }
        tracing::info!(agent = %id, "agent assigned");
        self.reset();
        self.agent_id = Some(id);
    }

    /// Forgets the target, stuck counter, invalidations and position history.
    /// The assigned id is kept.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.history.clear();
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn agent_id(&self) -> Option<&AgentId> {
        self.agent_id.as_ref()
    }

    pub fn target(&self) -> Option<Position> {
        self.tracker.target()
    }

    pub fn stuck_ticks(&self) -> u32 {
        self.tracker.stuck_ticks()
    }

    pub fn is_invalidated(&self, position: Position) -> bool {
        self.tracker.is_invalidated(position)
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    /// Produces exactly one command for the snapshot.
    ///
    /// Priority, first match wins:
    ///
    /// 1. a held power pellet is used
    /// 2. in immediate danger, flee if any move is open
    /// 3. any other held power-up whose activation policy fires is used
    /// 4. the target is updated and the planner moves towards it, or explores
    ///
    /// A missing or unassigned agent and a fully enclosed agent yield
    /// [`BotCommand::DEFAULT`]. An agent reported off the board counts as
    /// missing.
    pub fn decide(&mut self, state: &GameState) -> BotCommand {
        let Some(id) = self.agent_id.as_ref() else {
            return self.finish(state, None, Stage::Unassigned, BotCommand::DEFAULT);
        };
        let Some(agent) = state
            .animal(id)
            .filter(|agent| state.grid.contains(agent.position))
        else {
            return self.finish(state, None, Stage::MissingAgent, BotCommand::DEFAULT);
        };

        self.history.record(agent.position);
        let ctx = AiContext::new(agent, state, &self.config);

        if agent.held_power_up == Some(PowerUpKind::PowerPellet) {
            return self.finish(state, Some(agent.position), Stage::UseItem, BotCommand::use_item());
        }

        if threat::is_immediate_danger(&ctx) {
            let flee = ctx
                .nearest_threat()
                .and_then(|(keeper, _)| threat::best_flee_direction(&ctx, keeper.position));
            if let Some(direction) = flee {
                return self.finish(state, Some(agent.position), Stage::Flee, direction.into());
            }
            tracing::debug!(position = %agent.position, "in danger with no flee move");
        }

        if let Some(kind) = agent.held_power_up {
            if power_up::should_activate(kind, &ctx) {
                return self.finish(
                    state,
                    Some(agent.position),
                    Stage::UseItem,
                    BotCommand::use_item(),
                );
            }
        }

        let target = self.tracker.update(&ctx).current();
        let zones = DangerZones::compute(state, self.config.danger_radius);
        let (stage, command) = match self.planner.plan(&ctx, target, &zones, &self.history) {
            Some(direction) if target.is_some() => (Stage::Pursue, direction.into()),
            Some(direction) => (Stage::Explore, direction.into()),
            None => (Stage::Enclosed, BotCommand::DEFAULT),
        };
        self.finish(state, Some(agent.position), stage, command)
    }

    fn finish(
        &mut self,
        state: &GameState,
        position: Option<Position>,
        stage: Stage,
        command: BotCommand,
    ) -> BotCommand {
        let trace = DecisionTrace {
            tick: state.tick,
            position,
            stage,
            target: self.tracker.target(),
            stuck_ticks: self.tracker.stuck_ticks(),
            action: command.action,
        };
        self.observer.observe(&trace);
        command
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("agent_id", &self.agent_id)
            .field("target", &self.tracker.target())
            .field("stuck_ticks", &self.tracker.stuck_ticks())
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
