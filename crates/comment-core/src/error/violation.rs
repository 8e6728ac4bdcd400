//! Validation violations
//!
//! A create or update request may break several rules at once; validation
//! collects every violation and reports them together rather than stopping
//! at the first.

use serde::Serialize;
use thiserror::Error;

/// A single validation violation found in comment text or an attachment
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Violation {
    #[error("text too long: {actual} code points (max {limit})")]
    TextTooLong { limit: usize, actual: usize },

    #[error("tag not allowed: <{tag}>")]
    DisallowedTag { tag: String },

    #[error("tag <{tag}> does not take attributes: {attribute}")]
    UnexpectedAttribute { tag: String, attribute: String },

    #[error("attribute not allowed on <a>: {attribute}")]
    DisallowedAttribute { attribute: String },

    #[error("<a> tag requires an href attribute")]
    MissingHref,

    #[error("unsafe or invalid link target: {value}")]
    UnsafeUrl { value: String },

    #[error("unsupported attachment format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("attachment too large: {actual} bytes (max {limit})")]
    AttachmentTooLarge { limit: usize, actual: usize },

    #[error("attachment is not a valid image")]
    InvalidImage,
}

impl Violation {
    /// Stable code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TextTooLong { .. } => "TEXT_TOO_LONG",
            Self::DisallowedTag { .. } => "DISALLOWED_TAG",
            Self::UnexpectedAttribute { .. } => "UNEXPECTED_ATTRIBUTE",
            Self::DisallowedAttribute { .. } => "DISALLOWED_ATTRIBUTE",
            Self::MissingHref => "MISSING_HREF",
            Self::UnsafeUrl { .. } => "UNSAFE_URL",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::AttachmentTooLarge { .. } => "ATTACHMENT_TOO_LARGE",
            Self::InvalidImage => "INVALID_IMAGE",
        }
    }
}

/// Ordered list of violations accumulated during validation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn extend(&mut self, other: Violations) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Consume into the underlying list
    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_codes() {
        let v = Violation::DisallowedTag {
            tag: "script".to_string(),
        };
        assert_eq!(v.code(), "DISALLOWED_TAG");
        assert_eq!(Violation::MissingHref.code(), "MISSING_HREF");
    }

    #[test]
    fn test_violations_display_joins() {
        let vs = Violations(vec![
            Violation::MissingHref,
            Violation::DisallowedTag {
                tag: "script".to_string(),
            },
        ]);
        let s = vs.to_string();
        assert!(s.contains("href"));
        assert!(s.contains("script"));
        assert!(s.contains("; "));
    }

    #[test]
    fn test_violation_serializes_with_code_tag() {
        let v = Violation::UnsafeUrl {
            value: "javascript:alert(1)".to_string(),
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"code\":\"UNSAFE_URL\""));
        assert!(json.contains("javascript:alert(1)"));
    }
}
