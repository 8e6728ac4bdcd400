//! Tolerant tag scanner
//!
//! Extracts tag-shaped tokens from text. A token starts at `<`, optionally
//! followed by `/`, then an ASCII alphanumeric name, then attributes, and
//! ends at `>`. Anything that fails this shape (no name, no terminating `>`)
//! is left as plain text and dropped from the token stream.

/// A scanned attribute; `value` is `None` for bare (boolean) attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// A scanned tag token. Names and attribute names are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    pub name: String,
    pub closing: bool,
    pub attrs: Vec<Attr>,
}

/// Scan all tag tokens in `text`, in order of appearance.
pub(crate) fn scan_tags(text: &str) -> Vec<Tag> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut tags = Vec::new();
    let mut i = 0;

    while i < len {
        if chars[i] != '<' {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        let closing = if j < len && chars[j] == '/' {
            j += 1;
            true
        } else {
            false
        };

        let name_start = j;
        while j < len && chars[j].is_ascii_alphanumeric() {
            j += 1;
        }
        if j == name_start {
            // Not a tag, e.g. "1 < 2"
            i += 1;
            continue;
        }
        let name: String = chars[name_start..j]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();

        let mut attrs = Vec::new();
        let mut complete = false;

        while j < len {
            while j < len && (chars[j].is_whitespace() || chars[j] == '/') {
                j += 1;
            }
            if j >= len {
                break;
            }
            if chars[j] == '>' {
                complete = true;
                j += 1;
                break;
            }
            if chars[j] == '<' {
                // Unterminated token; re-scan from here
                break;
            }

            let attr_start = j;
            while j < len && (chars[j].is_ascii_alphanumeric() || matches!(chars[j], '-' | '_' | ':')) {
                j += 1;
            }
            if j == attr_start {
                // Stray character inside the tag, skip it
                j += 1;
                continue;
            }
            let attr_name: String = chars[attr_start..j]
                .iter()
                .collect::<String>()
                .to_ascii_lowercase();

            let mut k = j;
            while k < len && chars[k].is_whitespace() {
                k += 1;
            }

            let value = if k < len && chars[k] == '=' {
                k += 1;
                while k < len && chars[k].is_whitespace() {
                    k += 1;
                }
                if k < len && (chars[k] == '"' || chars[k] == '\'') {
                    let quote = chars[k];
                    k += 1;
                    let value_start = k;
                    while k < len && chars[k] != quote {
                        k += 1;
                    }
                    let value: String = chars[value_start..k].iter().collect();
                    if k < len {
                        k += 1; // consume closing quote
                    }
                    j = k;
                    Some(value)
                } else {
                    let value_start = k;
                    while k < len && !chars[k].is_whitespace() && chars[k] != '>' {
                        k += 1;
                    }
                    let value: String = chars[value_start..k].iter().collect();
                    j = k;
                    Some(value)
                }
            } else {
                None
            };

            attrs.push(Attr {
                name: attr_name,
                value,
            });
        }

        if complete {
            tags.push(Tag {
                name,
                closing,
                attrs,
            });
            i = j;
        } else {
            // Token never closed; resume scanning wherever we stopped
            i = j.max(i + 1);
        }
    }

    tags
}
