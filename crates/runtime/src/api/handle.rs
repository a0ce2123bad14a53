//! Cloneable façade for issuing commands to the decision worker.
//!
//! [`BotHandle`] hides channel plumbing. Every call is queued on the worker's
//! single-consumer channel, so decisions from any number of clones are
//! serialized.
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use game_core::{AgentId, BotCommand, GameState, Position};

use super::errors::{Result, RuntimeError};
use super::providers::CommandProvider;
use crate::workers::Command;

/// Point-in-time view of the engine's private state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineStatus {
    pub agent_id: Option<AgentId>,
    pub target: Option<Position>,
    pub stuck_ticks: u32,
    /// Oldest first.
    pub history: Vec<Position>,
}

/// Client-facing handle to the decision worker
#[derive(Clone, Debug)]
pub struct BotHandle {
    command_tx: mpsc::Sender<Command>,
}

impl BotHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    /// Bind the engine to the animal it controls
    pub async fn assign(&self, id: impl Into<AgentId>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Assign {
                id: id.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Decide the command for one snapshot
    pub async fn decide(&self, state: GameState) -> Result<BotCommand> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Decide {
                state: Box::new(state),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Clear target, stuck counter, invalidations and history
    pub async fn reset(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Reset { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the engine's private state (read-only snapshot)
    pub async fn status(&self) -> Result<EngineStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Status { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}

#[async_trait]
impl CommandProvider for BotHandle {
    async fn assign(&self, id: AgentId) -> Result<()> {
        BotHandle::assign(self, id).await
    }

    async fn provide_command(&self, state: GameState) -> Result<BotCommand> {
        self.decide(state).await
    }
}
