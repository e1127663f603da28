//! Engine configuration loader.
//!
//! Reads `config.toml` and deserializes it into [`EngineConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::Path;

use autolearn_types::config::EngineConfig;

/// Smallest usable depth ceiling: a top-level run occupies one frame.
const MIN_CALL_DEPTH: usize = 1;

/// Load engine configuration from `path`.
///
/// - Missing file: returns [`EngineConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Otherwise returns the parsed config with `max_call_depth` floored at 1.
pub async fn load_engine_config(path: &Path) -> EngineConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return EngineConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return EngineConfig::default();
        }
    };

    match toml::from_str::<EngineConfig>(&content) {
        Ok(mut config) => {
            config.max_call_depth = config.max_call_depth.max(MIN_CALL_DEPTH);
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            EngineConfig::default()
        }
    }
}

/// Resolve the depth ceiling for one run.
///
/// A per-run override wins over the configured default; the result is never
/// below 1.
pub fn resolve_max_depth(config: &EngineConfig, run_override: Option<usize>) -> usize {
    run_override
        .unwrap_or(config.max_call_depth)
        .max(MIN_CALL_DEPTH)
}
