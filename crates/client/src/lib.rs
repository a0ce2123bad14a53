//! Stdio transport for the Zooscape decision runtime.
//!
//! The binary reads one JSON message per line from stdin and answers every
//! game-state snapshot with one `{"action":N}` line on stdout. Everything
//! here is plumbing around [`runtime::BotHandle`]; no decision logic lives in
//! this crate.
//!
//! - [`config`]: environment-driven configuration
//! - [`protocol`]: wire messages and their conversion into [`game_core::GameState`]
//! - [`transport`]: the line loop
//! - [`logging`]: subscriber setup (stdout is reserved for commands)

pub mod config;
pub mod logging;
pub mod protocol;
pub mod transport;

pub use config::ClientConfig;
pub use transport::SessionStats;
