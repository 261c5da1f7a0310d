//! Options controlling how a template is assembled.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// What to do when two record sets derive the same resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Keep the record set seen last, logging a warning.
    #[default]
    Overwrite,

    /// Fail the export.
    Error,

    /// Append a numeric suffix, starting at 2, until the name is unique.
    Suffix,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::Error => f.write_str("error"),
            CollisionPolicy::Suffix => f.write_str("suffix"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown collision policy {0:?}, expected one of: overwrite, error, suffix")]
pub struct UnknownPolicy(String);

impl FromStr for CollisionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "error" => Ok(CollisionPolicy::Error),
            "suffix" => Ok(CollisionPolicy::Suffix),
            _ => Err(UnknownPolicy(s.to_owned())),
        }
    }
}

/// Configuration for template export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportOptions {
    #[serde(default)]
    pub collisions: CollisionPolicy,

    /// Replaces the generated `DNS for <domain>` description.
    #[serde(default)]
    pub description: Option<String>,
}
