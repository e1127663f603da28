//! Skill metadata types.
//!
//! `SkillMeta` is the identity and contract of a registered skill: its name,
//! description, version, and the ordered keyword parameters it accepts. The
//! parameter schema is descriptive only; bodies validate their own input.

use std::fmt;

use semver::Version;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter schema
// ---------------------------------------------------------------------------

/// Primitive type tag for a skill parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Number,
    String,
    Boolean,
    Object,
    /// Accepts any JSON value.
    Any,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Object => write!(f, "object"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// A single named keyword parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

// ---------------------------------------------------------------------------
// SkillMeta
// ---------------------------------------------------------------------------

fn default_version() -> Version {
    Version::new(0, 1, 0)
}

/// Identity and contract of a registered skill.
///
/// The `name` is the registry key. Re-registering a skill under the same name
/// replaces the previous entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: Version,
    /// Keyword parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<SkillParam>,
}

impl SkillMeta {
    /// Create metadata with no parameters and the default version (0.1.0).
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: default_version(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter to the schema.
    pub fn param(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.parameters.push(SkillParam {
            name: name.into(),
            param_type,
        });
        self
    }

    /// Override the version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Look up a declared parameter's type by name.
    pub fn param_type(&self, name: &str) -> Option<ParamType> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.param_type)
    }

    /// Render the signature as `name(a: number, b: number)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.param_type))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}
