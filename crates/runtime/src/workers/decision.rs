//! Decision worker that owns the [`DecisionEngine`].
//!
//! Receives commands from [`crate::BotHandle`] over a bounded channel and
//! processes them strictly in arrival order, which keeps the engine's
//! cross-tick state consistent.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::{AgentId, BotCommand, GameState};

use crate::api::EngineStatus;
use crate::providers::ai::DecisionEngine;

/// Commands that can be sent to the decision worker
pub enum Command {
    /// Bind the engine to an agent id.
    Assign {
        id: AgentId,
        reply: oneshot::Sender<()>,
    },
    /// Decide the command for one snapshot.
    Decide {
        state: Box<GameState>,
        reply: oneshot::Sender<BotCommand>,
    },
    /// Drop all cross-tick state.
    Reset { reply: oneshot::Sender<()> },
    /// Query the engine's private state (read-only).
    Status { reply: oneshot::Sender<EngineStatus> },
}

/// Background task that processes decision commands.
pub struct DecisionWorker {
    engine: DecisionEngine,
    command_rx: mpsc::Receiver<Command>,
}

impl DecisionWorker {
    pub fn new(engine: DecisionEngine, command_rx: mpsc::Receiver<Command>) -> Self {
        tracing::info!(
            tie_break = ?engine.config().tie_break,
            history_capacity = engine.config().history_capacity,
            "decision worker initialized"
        );

        Self { engine, command_rx }
    }

    /// Main worker loop. Ends once every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!("decision worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Assign { id, reply } => {
                self.engine.assign(id);
                if reply.send(()).is_err() {
                    debug!("Assign reply channel closed (caller dropped)");
                }
            }
            Command::Decide { state, reply } => {
                let command = self.engine.decide(&state);
                if reply.send(command).is_err() {
                    debug!(tick = %state.tick, "Decide reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                self.engine.reset();
                if reply.send(()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::Status { reply } => {
                let status = EngineStatus {
                    agent_id: self.engine.agent_id().cloned(),
                    target: self.engine.target(),
                    stuck_ticks: self.engine.stuck_ticks(),
                    history: self.engine.history().iter().collect(),
                };
                if reply.send(status).is_err() {
                    debug!("Status reply channel closed (caller dropped)");
                }
            }
        }
    }
}
