//! Execution context for nested skill calls.
//!
//! `ExecutionContext` records the call chain from the top-level skill down to
//! the currently executing one, together with the depth ceiling for the run.
//! Contexts are never mutated: `descend` returns a new snapshot, so a frame
//! that calls two sub-skills in sequence hands each the same parent chain.

use std::fmt;

use autolearn_types::config::DEFAULT_MAX_CALL_DEPTH;

use super::error::{SkillError, format_chain};

/// Immutable view of where a run currently is in its call tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    call_chain: Vec<String>,
    max_depth: usize,
}

impl ExecutionContext {
    /// Context for a fresh top-level run: empty chain, default depth ceiling.
    pub fn root() -> Self {
        Self::with_max_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    /// Root context with an overridden depth ceiling.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            call_chain: Vec::new(),
            max_depth,
        }
    }

    /// Derive the context for calling `name` from this frame.
    ///
    /// # Errors
    ///
    /// - [`SkillError::CircularDependency`] if `name` is already on the chain.
    ///   The reported chain is the attempted one, ending with `name`.
    /// - [`SkillError::MaxDepthExceeded`] if the extended chain would be
    ///   longer than `max_depth`.
    pub fn descend(&self, name: &str) -> Result<Self, SkillError> {
        let mut chain = Vec::with_capacity(self.call_chain.len() + 1);
        chain.extend(self.call_chain.iter().cloned());
        chain.push(name.to_string());

        if self.contains(name) {
            tracing::warn!(chain = %format_chain(&chain), "circular skill dependency rejected");
            return Err(SkillError::CircularDependency { chain });
        }

        if chain.len() > self.max_depth {
            tracing::warn!(
                chain = %format_chain(&chain),
                max_depth = self.max_depth,
                "skill call depth limit reached"
            );
            return Err(SkillError::MaxDepthExceeded {
                chain,
                max_depth: self.max_depth,
            });
        }

        Ok(Self {
            call_chain: chain,
            max_depth: self.max_depth,
        })
    }

    pub fn call_chain(&self) -> &[String] {
        &self.call_chain
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of frames on the chain (0 for a root context).
    pub fn depth(&self) -> usize {
        self.call_chain.len()
    }

    /// The currently executing skill, if any.
    pub fn current(&self) -> Option<&str> {
        self.call_chain.last().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.call_chain.iter().any(|n| n == name)
    }

    pub fn is_root(&self) -> bool {
        self.call_chain.is_empty()
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.call_chain.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", format_chain(&self.call_chain))
        }
    }
}
