//! Rule-based decision engine for a single controlled animal.
//!
//! Each tick flows through a fixed priority hierarchy:
//!
//! 1. **Threat**: flee the nearest zookeeper when it is within the flee
//!    threshold and no cloak is active ([`threat`])
//! 2. **Power-up**: use the held power-up when its policy fires ([`power_up`])
//! 3. **Target**: keep, replace or abandon the pursued cell ([`target`])
//! 4. **Movement**: pick the safest progress-making step ([`movement`]),
//!    avoiding recently visited cells ([`history`])
//!
//! # Core Components
//!
//! - [`DecisionEngine`]: owns cross-tick state and produces one command per tick
//! - [`AiContext`]: read-only per-tick view shared by every stage
//! - [`DecisionObserver`]: diagnostic side channel fed one [`DecisionTrace`] per tick

pub mod context;
pub mod engine;
pub mod history;
pub mod movement;
pub mod observer;
pub mod power_up;
pub mod target;
pub mod threat;

pub use context::AiContext;
pub use engine::DecisionEngine;
pub use history::PositionHistory;
pub use movement::MovementPlanner;
pub use observer::{DecisionObserver, DecisionTrace, NoopObserver, Stage, TracingObserver};
pub use target::{TargetOutcome, TargetTracker};
pub use threat::DangerZones;
