//! Proxy tag - prefix/suffix convention that attributes a message to a member
//!
//! A message written as `{prefix}text{suffix}` is spoken by the member owning
//! the tag. Absent sides are omitted from JSON instead of being written as null.

use serde::{Deserialize, Serialize};

/// A single proxy tag (either side may be absent)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProxyTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl ProxyTag {
    /// Create a tag from optional prefix and suffix
    pub fn new(prefix: Option<String>, suffix: Option<String>) -> Self {
        Self { prefix, suffix }
    }

    /// Create a prefix-only tag such as `a:`
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            suffix: None,
        }
    }

    /// Create a suffix-only tag such as `-a`
    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self {
            prefix: None,
            suffix: Some(suffix.into()),
        }
    }

    /// Check whether at least one side is non-empty
    ///
    /// Tags with both sides empty would match every message and are ignored
    /// during detection.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.prefix.as_deref().is_some_and(|p| !p.is_empty())
            || self.suffix.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Strip this tag from a message, returning the trimmed inner text
    ///
    /// Returns `None` when the tag is unusable, when the message does not
    /// carry both sides, or when nothing is left between them.
    pub fn strip<'a>(&self, text: &'a str) -> Option<&'a str> {
        if !self.is_usable() {
            return None;
        }

        let inner = text
            .strip_prefix(self.prefix.as_deref().unwrap_or_default())?
            .strip_suffix(self.suffix.as_deref().unwrap_or_default())?
            .trim();

        (!inner.is_empty()).then_some(inner)
    }
}
