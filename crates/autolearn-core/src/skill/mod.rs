//! Skill registration and composition-safe execution.
//!
//! [`SkillEngine`] is the entry point: `register` a body under a name, then
//! `run` it. Bodies receive a [`SkillDispatcher`] bound to their own frame and
//! may call other skills through it; [`ExecutionContext`] rejects cycles and
//! enforces the depth ceiling on every nested call. The metadata types live
//! in `autolearn-types::skill`.

pub mod args;
pub mod body;
pub mod builtin;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod registry;
pub mod runner;

pub use args::{KwargsExt, kwargs};
pub use body::{Kwargs, Skill, SkillBody, SkillOutput};
pub use context::ExecutionContext;
pub use dispatcher::SkillDispatcher;
pub use engine::SkillEngine;
pub use error::{ErrorKind, SkillError};
pub use registry::SkillRegistry;
pub use runner::SkillRunner;
