//! Bot configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use runtime::{EngineConfig, TieBreak};

/// Configuration required to start the decision runtime and transport.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub engine: EngineConfig,
    /// Capacity of the decision worker's command queue.
    pub queue_size: usize,
    /// Write logs to a file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
    /// Agent id to bind before the server's registration message arrives.
    pub bot_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            queue_size: 32,
            log_dir: None,
            bot_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BOT_ENGINE_CONFIG` - JSON file with engine settings, applied first
    /// - `BOT_FLEE_THRESHOLD` - Flee when a zookeeper is this close (default: 4)
    /// - `BOT_DANGER_RADIUS` - Danger zone radius around zookeepers (default: 3)
    /// - `BOT_STUCK_THRESHOLD` - Ticks without progress before a target is dropped (default: 5)
    /// - `BOT_HISTORY_CAPACITY` - Recent positions remembered (default: 4)
    /// - `BOT_TIE_BREAK` - `random` or `ordered` (default: random)
    /// - `BOT_RNG_SEED` - Seed for the tie-break RNG (default: OS entropy)
    /// - `BOT_QUEUE_SIZE` - Decision worker queue size (default: 32)
    /// - `BOT_LOG_DIR` - Log directory (default: stderr)
    /// - `BOT_ID` - Pre-assigned agent id (default: wait for registration)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("BOT_ENGINE_CONFIG") {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read engine config {path}"))?;
            config.engine = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse engine config {path}"))?;
        }

        // Engine overrides
        if let Some(threshold) = parse(&lookup, "BOT_FLEE_THRESHOLD") {
            config.engine.flee_threshold = threshold;
        }
        if let Some(radius) = parse(&lookup, "BOT_DANGER_RADIUS") {
            config.engine.danger_radius = radius;
        }
        if let Some(threshold) = parse(&lookup, "BOT_STUCK_THRESHOLD") {
            config.engine.stuck_threshold = threshold;
        }
        if let Some(capacity) = parse(&lookup, "BOT_HISTORY_CAPACITY") {
            config.engine.history_capacity = capacity;
        }
        if let Some(tie_break) = parse::<TieBreak, _>(&lookup, "BOT_TIE_BREAK") {
            config.engine.tie_break = tie_break;
        }
        if let Some(seed) = parse(&lookup, "BOT_RNG_SEED") {
            config.engine.rng_seed = Some(seed);
        }

        // Transport
        if let Some(capacity) = parse::<usize, _>(&lookup, "BOT_QUEUE_SIZE") {
            config.queue_size = capacity.max(1);
        }
        config.log_dir = lookup("BOT_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        config.bot_id = lookup("BOT_ID").filter(|id| !id.trim().is_empty());

        Ok(config)
    }
}

/// Unparseable values are ignored and the default kept.
fn parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
