//! Event types for the skill engine event bus.
//!
//! `SkillEvent` is broadcast when skills are registered or removed and when a
//! top-level run starts and finishes. Subscribers are purely observational;
//! the engine never depends on anyone listening.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the skill engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEvent {
    /// A skill was registered (or replaced an existing registration).
    Registered { name: String, replaced: bool },

    /// A skill was explicitly removed from the registry.
    Removed { name: String },

    /// A top-level run has started.
    ExecutionStarted { run_id: Uuid, skill: String },

    /// A top-level run completed successfully.
    ExecutionCompleted {
        run_id: Uuid,
        skill: String,
        duration_ms: u64,
    },

    /// A top-level run failed.
    ExecutionFailed {
        run_id: Uuid,
        skill: String,
        error: String,
        /// The call chain at the innermost failure point.
        call_chain: Vec<String>,
    },
}

impl SkillEvent {
    /// The skill this event concerns.
    pub fn skill_name(&self) -> &str {
        match self {
            SkillEvent::Registered { name, .. } | SkillEvent::Removed { name } => name,
            SkillEvent::ExecutionStarted { skill, .. }
            | SkillEvent::ExecutionCompleted { skill, .. }
            | SkillEvent::ExecutionFailed { skill, .. } => skill,
        }
    }

    /// The run id for execution events, or None for registry events.
    pub fn run_id(&self) -> Option<Uuid> {
        match self {
            SkillEvent::ExecutionStarted { run_id, .. }
            | SkillEvent::ExecutionCompleted { run_id, .. }
            | SkillEvent::ExecutionFailed { run_id, .. } => Some(*run_id),
            SkillEvent::Registered { .. } | SkillEvent::Removed { .. } => None,
        }
    }
}
