//! Markup sanitizer for comment text
//!
//! Comments may carry a tiny inline-markup subset. This module validates
//! that subset with a tolerant tag scanner, not a full HTML parser: anything
//! shaped like `<name attr="value">` or `</name>` is treated as a tag token
//! and checked against the allow-list; everything else is plain text.
//!
//! Nesting and well-formedness are deliberately not checked; a stray
//! unmatched closing tag passes. Validation accumulates every violation
//! before returning, and never rewrites the text: input that passes is
//! stored verbatim.

mod scanner;

use url::Url;

use crate::error::{Violation, Violations};

use scanner::{scan_tags, Tag};

/// Maximum comment text length, in Unicode code points
pub const MAX_TEXT_CODE_POINTS: usize = 500;

/// Tags permitted in comment text
const ALLOWED_TAGS: [&str; 4] = ["i", "strong", "code", "a"];

/// Validate comment text against the markup subset.
///
/// Returns the input unchanged on success, or the ordered list of every
/// violation found.
pub fn sanitize(text: &str) -> Result<&str, Violations> {
    let mut violations = Violations::new();

    let code_points = text.chars().count();
    if code_points > MAX_TEXT_CODE_POINTS {
        violations.push(Violation::TextTooLong {
            limit: MAX_TEXT_CODE_POINTS,
            actual: code_points,
        });
    }

    for tag in scan_tags(text) {
        check_tag(&tag, &mut violations);
    }

    if violations.is_empty() {
        Ok(text)
    } else {
        Err(violations)
    }
}

fn check_tag(tag: &Tag, violations: &mut Violations) {
    if !ALLOWED_TAGS.contains(&tag.name.as_str()) {
        violations.push(Violation::DisallowedTag {
            tag: tag.name.clone(),
        });
        return;
    }

    // Closing tags carry no attributes worth checking
    if tag.closing {
        return;
    }

    if tag.name == "a" {
        check_anchor(tag, violations);
    } else {
        for attr in &tag.attrs {
            violations.push(Violation::UnexpectedAttribute {
                tag: tag.name.clone(),
                attribute: attr.name.clone(),
            });
        }
    }
}

fn check_anchor(tag: &Tag, violations: &mut Violations) {
    let mut has_href = false;

    for attr in &tag.attrs {
        match attr.name.as_str() {
            "href" => {
                has_href = true;
                check_href(attr.value.as_deref().unwrap_or(""), violations);
            }
            "title" => {}
            other => violations.push(Violation::DisallowedAttribute {
                attribute: other.to_string(),
            }),
        }
    }

    if !has_href {
        violations.push(Violation::MissingHref);
    }
}

fn check_href(value: &str, violations: &mut Violations) {
    let trimmed = value.trim();

    match Url::parse(trimmed) {
        Ok(url) if url.scheme() == "javascript" => {
            violations.push(Violation::UnsafeUrl {
                value: value.to_string(),
            });
        }
        Ok(_) => {}
        Err(_) => {
            violations.push(Violation::UnsafeUrl {
                value: value.to_string(),
            });
        }
    }
}
