//! Shared domain types for AutoLearn.
//!
//! Skill metadata, engine configuration, and the events broadcast by the
//! skill engine. Zero infrastructure dependencies -- only serde, uuid
//! and semver.

pub mod config;
pub mod event;
pub mod skill;
