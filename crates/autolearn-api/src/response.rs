//! Envelope returned by `autolearn run --json`.
//!
//! ```json
//! { "success": false, "result": null, "error": "skill 'formula' raised: ...",
//!   "kind": "body_fault", "call_chain": ["formula", "add"] }
//! ```

use autolearn_core::skill::{SkillError, SkillOutput};
use serde::Serialize;

/// Outcome of one top-level run, shaped for machine consumption.
#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub success: bool,

    /// Body output on success.
    pub result: Option<SkillOutput>,

    /// Display form of the outermost error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Classification of the innermost error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Chain recorded at the point of failure.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub call_chain: Vec<String>,
}

impl From<Result<SkillOutput, SkillError>> for RunResponse {
    fn from(result: Result<SkillOutput, SkillError>) -> Self {
        match result {
            Ok(output) => Self {
                success: true,
                result: Some(output),
                error: None,
                kind: None,
                call_chain: Vec::new(),
            },
            Err(err) => Self {
                success: false,
                result: None,
                error: Some(err.to_string()),
                kind: Some(err.kind().to_string()),
                call_chain: err.failure_chain().to_vec(),
            },
        }
    }
}
