//! Skill runner: executes one body inside a bound execution context.
//!
//! The runner is the single place where failures escaping a body are turned
//! into [`SkillError::Runtime`]. Because nested calls re-enter the runner,
//! a failure at depth N is wrapped once per frame as it unwinds, each
//! envelope recording its own skill and chain, with the original cause at
//! the bottom.

use std::sync::Arc;

use super::body::{Kwargs, Skill, SkillOutput};
use super::context::ExecutionContext;
use super::dispatcher::SkillDispatcher;
use super::error::SkillError;
use super::registry::SkillRegistry;

/// Executes skills from a shared registry.
///
/// Cloning is cheap (the registry is behind an `Arc`); the runner holds no
/// per-run state.
#[derive(Debug, Clone)]
pub struct SkillRunner {
    registry: Arc<SkillRegistry>,
}

impl SkillRunner {
    pub fn new(registry: Arc<SkillRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SkillRegistry> {
        &self.registry
    }

    /// Run `name` as a top-level invocation with a fresh root context.
    pub fn run(&self, name: &str, kwargs: &Kwargs) -> Result<SkillOutput, SkillError> {
        self.run_in_context(name, kwargs, &ExecutionContext::root())
    }

    /// Run `name` as a call made from the frame described by `context`.
    ///
    /// Pass a root context (optionally with an overridden depth ceiling) for
    /// a top-level run.
    ///
    /// # Errors
    ///
    /// `NotFound` if `name` is not registered, the chain errors from
    /// [`ExecutionContext::descend`], or `Runtime` if the body fails.
    pub fn run_in_context(
        &self,
        name: &str,
        kwargs: &Kwargs,
        context: &ExecutionContext,
    ) -> Result<SkillOutput, SkillError> {
        let skill = self.registry.get(name)?;
        let frame = context.descend(name)?;
        self.execute(&skill, kwargs, frame)
    }

    /// Invoke `skill`'s body in `frame`, whose chain already ends with it.
    pub(crate) fn execute(
        &self,
        skill: &Skill,
        kwargs: &Kwargs,
        frame: ExecutionContext,
    ) -> Result<SkillOutput, SkillError> {
        let span = tracing::debug_span!("skill", skill = %skill.name(), depth = frame.depth());
        let _enter = span.enter();

        let dispatcher = SkillDispatcher::new(self.clone(), frame);
        match skill.body().invoke(kwargs, &dispatcher) {
            Ok(output) => {
                tracing::debug!(keys = output.len(), "skill completed");
                Ok(output)
            }
            Err(source) => {
                tracing::debug!(error = %source, "skill failed");
                let frame = dispatcher.into_context();
                Err(SkillError::Runtime {
                    skill: skill.name().to_string(),
                    call_chain: frame.call_chain().to_vec(),
                    source,
                })
            }
        }
    }
}
