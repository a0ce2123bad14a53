//! Asynchronous abstraction for sourcing bot commands.
//!
//! The transport talks to a [`CommandProvider`] so it can run against the
//! live decision worker, a scripted fixture, or a do-nothing fallback.
use async_trait::async_trait;
use game_core::{AgentId, BotCommand, GameState};

use super::errors::Result;

/// Source of one [`BotCommand`] per snapshot.
#[async_trait]
pub trait CommandProvider: Send + Sync {
    /// Binds the provider to the animal it controls.
    async fn assign(&self, _id: AgentId) -> Result<()> {
        Ok(())
    }

    /// Produces the command for `state`.
    async fn provide_command(&self, state: GameState) -> Result<BotCommand>;
}

/// Always answers with [`BotCommand::DEFAULT`].
/// Useful for testing or as a fallback.
pub struct IdleCommandProvider;

#[async_trait]
impl CommandProvider for IdleCommandProvider {
    async fn provide_command(&self, _state: GameState) -> Result<BotCommand> {
        Ok(BotCommand::DEFAULT)
    }
}
