//! Event bus for skill engine notifications.
//!
//! Provides an `EventBus` that distributes `SkillEvent` messages to all
//! subscribers via a `tokio::sync::broadcast` channel.

pub mod bus;

pub use bus::EventBus;
