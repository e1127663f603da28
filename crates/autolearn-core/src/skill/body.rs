//! Skill body trait.
//!
//! A body receives its keyword arguments plus the [`SkillDispatcher`] bound to
//! its own frame, and returns a result map. Bodies that never compose simply
//! ignore the dispatcher.

use std::fmt;
use std::sync::Arc;

use autolearn_types::skill::SkillMeta;
use serde_json::{Map, Value};

use super::dispatcher::SkillDispatcher;

/// Keyword arguments passed to a skill.
pub type Kwargs = Map<String, Value>;

/// Result mapping returned by a skill.
pub type SkillOutput = Map<String, Value>;

/// Executable part of a skill.
///
/// Implemented for any `Fn(&Kwargs, &SkillDispatcher) -> anyhow::Result<SkillOutput>`
/// closure, so most skills are registered as plain closures.
pub trait SkillBody: Send + Sync {
    fn invoke(&self, args: &Kwargs, skills: &SkillDispatcher) -> anyhow::Result<SkillOutput>;
}

impl<F> SkillBody for F
where
    F: Fn(&Kwargs, &SkillDispatcher) -> anyhow::Result<SkillOutput> + Send + Sync,
{
    fn invoke(&self, args: &Kwargs, skills: &SkillDispatcher) -> anyhow::Result<SkillOutput> {
        self(args, skills)
    }
}

/// A registered skill: metadata paired with its body.
#[derive(Clone)]
pub struct Skill {
    meta: SkillMeta,
    body: Arc<dyn SkillBody>,
}

impl Skill {
    pub fn new(meta: SkillMeta, body: Arc<dyn SkillBody>) -> Self {
        Self { meta, body }
    }

    pub fn meta(&self) -> &SkillMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub(crate) fn body(&self) -> &dyn SkillBody {
        self.body.as_ref()
    }
}

impl fmt::Debug for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skill").field("meta", &self.meta).finish_non_exhaustive()
    }
}
