//! Engine configuration types.
//!
//! `EngineConfig` represents the `config.toml` that controls the default call
//! depth ceiling and the event bus capacity.

use serde::{Deserialize, Serialize};

/// Default ceiling on the length of a skill call chain.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 5;

/// Default capacity of the engine's event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Top-level configuration for the skill engine.
///
/// Loaded from `~/.autolearn/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum call chain length for a top-level run (including the
    /// top-level skill itself).
    #[serde(default = "default_max_call_depth")]
    pub max_call_depth: usize,

    /// Buffered events per subscriber before lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_max_call_depth() -> usize {
    DEFAULT_MAX_CALL_DEPTH
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_call_depth: default_max_call_depth(),
            event_capacity: default_event_capacity(),
        }
    }
}
