//! High-level runtime orchestrator.
//!
//! The runtime owns the decision worker, wires up its command channel, and
//! exposes a builder-based API for clients to drive decisions.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::{BotCommand, GameState};

use crate::api::{BotHandle, Result, RuntimeError};
use crate::config::EngineConfig;
use crate::providers::ai::{DecisionEngine, DecisionObserver, TracingObserver};
use crate::workers::{Command, DecisionWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts the decision engine on a background task
///
/// [`BotHandle`] provides a cloneable façade for clients.
pub struct BotRuntime {
    handle: BotHandle,
    worker_handle: JoinHandle<()>,
}

impl BotRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Start a runtime with the given configuration and a tracing observer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: RuntimeConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> BotHandle {
        self.handle.clone()
    }

    /// Decide a single snapshot
    pub async fn step(&self, state: GameState) -> Result<BotCommand> {
        self.handle.decide(state).await
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker drains queued commands and exits once every outstanding
    /// handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BotRuntime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    observer: Box<dyn DecisionObserver>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            observer: Box::new(TracingObserver),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    /// Replace the default [`TracingObserver`].
    pub fn observer(mut self, observer: impl DecisionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Build the runtime and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> BotRuntime {
        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let handle = BotHandle::new(command_tx);

        let mut engine = DecisionEngine::new(self.config.engine);
        engine.set_observer(self.observer);
        let worker = DecisionWorker::new(engine, command_rx);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        BotRuntime {
            handle,
            worker_handle,
        }
    }
}
