//! Built-in skills registered by [`SkillEngine::with_default_skills`].

use autolearn_types::skill::{ParamType, SkillMeta};
use serde_json::Value;

use super::args::KwargsExt;
use super::body::{Kwargs, SkillOutput};
use super::dispatcher::SkillDispatcher;
use super::engine::SkillEngine;
use super::error::SkillError;

/// Register every built-in skill on `engine`.
pub fn register_builtins(engine: &SkillEngine) -> Result<(), SkillError> {
    engine.register(echo_meta(), echo)
}

pub fn echo_meta() -> SkillMeta {
    SkillMeta::new("echo", "Return the input payload").param("payload", ParamType::Any)
}

/// `echo(payload) -> {"echo": payload}`; a missing payload echoes `null`.
pub fn echo(args: &Kwargs, _skills: &SkillDispatcher) -> anyhow::Result<SkillOutput> {
    let payload = args.optional("payload").cloned().unwrap_or(Value::Null);
    let mut out = SkillOutput::new();
    out.insert("echo".to_string(), payload);
    Ok(out)
}
