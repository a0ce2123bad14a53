//! Line-delimited JSON transport.
//!
//! One inbound message per line; one outbound command line per snapshot.
//! Malformed lines are logged and skipped. A snapshot that fails validation is
//! still answered, with [`BotCommand::DEFAULT`], so the server always gets a
//! reply for every tick it sent.

use anyhow::{Context, Result};
use game_core::{AgentId, BotCommand, GameState};
use runtime::CommandProvider;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::protocol::{ServerMessage, encode_command};

/// Counters for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Snapshots answered with a decided command.
    pub snapshots: u64,
    /// Snapshots answered with the default command after failing validation.
    pub rejected: u64,
    /// Lines that were not valid messages.
    pub skipped: u64,
}

/// Pumps messages from `reader` to `provider` and commands to `writer` until
/// a disconnect message or end of input.
pub async fn run<R, W, P>(reader: R, mut writer: W, provider: &P) -> Result<SessionStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    P: CommandProvider + ?Sized,
{
    let mut stats = SessionStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("failed to read from server")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message = match serde_json::from_str::<ServerMessage>(line) {
            Ok(message) => message,
            Err(error) => {
                warn!(%error, "skipping malformed message");
                stats.skipped += 1;
                continue;
            }
        };

        match message {
            ServerMessage::Registered { bot_id } => {
                info!(bot_id = %bot_id, "registered with server");
                provider.assign(AgentId::new(bot_id)).await?;
            }
            ServerMessage::GameState(snapshot) => {
                let tick = snapshot.tick;
                let command = match GameState::try_from(snapshot) {
                    Ok(state) => {
                        stats.snapshots += 1;
                        provider.provide_command(state).await?
                    }
                    Err(error) => {
                        warn!(tick, %error, "invalid snapshot, sending default command");
                        stats.rejected += 1;
                        BotCommand::DEFAULT
                    }
                };
                debug!(tick, action = %command.action, "sending command");
                send(&mut writer, &command).await?;
            }
            ServerMessage::Disconnect => {
                info!("server disconnected");
                break;
            }
        }
    }

    Ok(stats)
}

async fn send<W>(writer: &mut W, command: &BotCommand) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = encode_command(command).context("failed to encode command")?;
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .await
        .context("failed to write command")?;
    writer.flush().await.context("failed to flush command")?;
    Ok(())
}
