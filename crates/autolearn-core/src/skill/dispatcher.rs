//! The call capability handed to running skill bodies.
//!
//! A `SkillDispatcher` is bound to the context of the frame it was created
//! for. Every `dispatch` descends from that context, so nested calls always
//! extend the caller's own chain, never a shared or root one.

use autolearn_types::skill::SkillMeta;

use super::body::{Kwargs, SkillOutput};
use super::context::ExecutionContext;
use super::error::SkillError;
use super::runner::SkillRunner;

/// Lets a skill body invoke other registered skills by name.
#[derive(Debug, Clone)]
pub struct SkillDispatcher {
    runner: SkillRunner,
    context: ExecutionContext,
}

impl SkillDispatcher {
    pub(crate) fn new(runner: SkillRunner, context: ExecutionContext) -> Self {
        Self { runner, context }
    }

    /// Call skill `name` with `kwargs` and return its result map unchanged.
    ///
    /// # Errors
    ///
    /// - [`SkillError::CircularDependency`] / [`SkillError::MaxDepthExceeded`]
    ///   if calling `name` from this frame would violate the chain invariants.
    /// - [`SkillError::NotFound`] if `name` is not registered.
    /// - [`SkillError::Runtime`] if the nested skill's body fails.
    ///
    /// None of these are retried; returning them with `?` aborts the caller.
    pub fn dispatch(&self, name: &str, kwargs: Kwargs) -> Result<SkillOutput, SkillError> {
        let next = self.context.descend(name)?;
        let skill = self.runner.registry().get(name)?;

        tracing::debug!(
            caller = self.context.current().unwrap_or("<root>"),
            callee = name,
            depth = next.depth(),
            "dispatching nested skill"
        );

        self.runner.execute(&skill, &kwargs, next)
    }

    /// The context of the frame this dispatcher belongs to.
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Metadata of every registered skill, in registration order.
    pub fn available(&self) -> Vec<SkillMeta> {
        self.runner.registry().list()
    }

    pub(crate) fn into_context(self) -> ExecutionContext {
        self.context
    }
}
