//! Composition-safe skill execution core for AutoLearn.
//!
//! Skills are named bodies registered at runtime. A running body may call
//! other skills through the [`skill::SkillDispatcher`] it is handed; every
//! nested call extends an immutable [`skill::ExecutionContext`] that rejects
//! cycles and caps nesting depth, so composition always terminates.

pub mod config;
pub mod event;
pub mod skill;
