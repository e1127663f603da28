//! Skill engine error taxonomy.
//!
//! The three safety errors (`NotFound`, `CircularDependency`,
//! `MaxDepthExceeded`) are raised exactly where the violation happens. Any
//! failure escaping a skill body is wrapped in `Runtime` by the runner, once
//! per nesting level, with the original cause kept as the error source.

use std::fmt;

use thiserror::Error;

/// Errors produced while registering or running skills.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("skill '{0}' not found")]
    NotFound(String),

    #[error("circular dependency detected: {}", format_chain(.chain))]
    CircularDependency { chain: Vec<String> },

    #[error(
        "max call depth {max_depth} exceeded: {}",
        format_chain(.chain)
    )]
    MaxDepthExceeded { chain: Vec<String>, max_depth: usize },

    #[error("skill '{skill}' raised: {source}")]
    Runtime {
        skill: String,
        /// Call chain of the failing frame, ending with `skill`.
        call_chain: Vec<String>,
        #[source]
        source: anyhow::Error,
    },

    #[error("invalid skill '{name}': {reason}")]
    InvalidSkill { name: String, reason: String },
}

/// Coarse classification of a failure, looking through `Runtime` envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    CircularDependency,
    MaxDepthExceeded,
    /// The body's own logic faulted.
    BodyFault,
    InvalidSkill,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::CircularDependency => write!(f, "circular_dependency"),
            Self::MaxDepthExceeded => write!(f, "max_depth_exceeded"),
            Self::BodyFault => write!(f, "body_fault"),
            Self::InvalidSkill => write!(f, "invalid_skill"),
        }
    }
}

pub(crate) fn format_chain(chain: &[String]) -> String {
    chain.join(" -> ")
}

impl SkillError {
    /// Follow nested `Runtime` envelopes down to the innermost `SkillError`.
    ///
    /// Stops at the first `Runtime` whose source is not a `SkillError` (an
    /// arbitrary body fault), returning that envelope.
    pub fn innermost(&self) -> &SkillError {
        let mut current = self;
        while let SkillError::Runtime { source, .. } = current {
            match source.downcast_ref::<SkillError>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    /// Classify this failure by its innermost cause.
    pub fn kind(&self) -> ErrorKind {
        match self.innermost() {
            SkillError::NotFound(_) => ErrorKind::NotFound,
            SkillError::CircularDependency { .. } => ErrorKind::CircularDependency,
            SkillError::MaxDepthExceeded { .. } => ErrorKind::MaxDepthExceeded,
            SkillError::Runtime { .. } => ErrorKind::BodyFault,
            SkillError::InvalidSkill { .. } => ErrorKind::InvalidSkill,
        }
    }

    /// The call chain at the innermost failure point.
    ///
    /// For cycle and depth violations this is the attempted chain; otherwise
    /// it is the chain of the deepest frame that reported the failure.
    pub fn failure_chain(&self) -> &[String] {
        let mut chain: &[String] = &[];
        let mut current = self;
        loop {
            match current {
                SkillError::CircularDependency { chain }
                | SkillError::MaxDepthExceeded { chain, .. } => return chain.as_slice(),
                SkillError::Runtime {
                    call_chain, source, ..
                } => {
                    chain = call_chain.as_slice();
                    match source.downcast_ref::<SkillError>() {
                        Some(inner) => current = inner,
                        None => return chain,
                    }
                }
                SkillError::NotFound(_) | SkillError::InvalidSkill { .. } => return chain,
            }
        }
    }

    /// Message of the innermost cause (the body's own error for faults).
    pub fn root_message(&self) -> String {
        match self.innermost() {
            SkillError::Runtime { source, .. } => format!("{source:#}"),
            other => other.to_string(),
        }
    }
}
