//! Application state for the `autolearn` binary.
//!
//! Loads the engine configuration and builds a [`SkillEngine`] with the
//! built-in and demo skills registered.

use std::path::{Path, PathBuf};

use autolearn_core::config::load_engine_config;
use autolearn_core::skill::SkillEngine;

use crate::demo::register_demo_skills;

/// Directory name under the user's home directory.
const DATA_DIR_NAME: &str = ".autolearn";

/// Shared state handed to every command handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: SkillEngine,
    pub config_path: PathBuf,
}

impl AppState {
    /// Load configuration from `config_override` (or the default location)
    /// and register all skills.
    pub async fn init(config_override: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match config_override {
            Some(path) => path.to_path_buf(),
            None => resolve_data_dir().join("config.toml"),
        };

        let config = load_engine_config(&config_path).await;
        tracing::debug!(
            path = %config_path.display(),
            max_call_depth = config.max_call_depth,
            "engine configuration loaded"
        );

        let engine = SkillEngine::with_default_skills(config)?;
        register_demo_skills(&engine)?;

        Ok(Self {
            engine,
            config_path,
        })
    }
}

/// `~/.autolearn`, or `./.autolearn` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
