//! Error types surfaced by the runtime API.
//!
//! Deciding a command never fails; only the plumbing between a
//! [`BotHandle`](super::BotHandle) and its worker can.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("decision worker command channel closed")]
    CommandChannelClosed,

    #[error("decision worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("decision worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
