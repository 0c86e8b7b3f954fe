//! Variable resolution
//!
//! Substitutes `{{variable}}` placeholders with values from the active
//! environment's variable list. Resolution is a pure function over
//! strings: placeholders without a matching key pass through literally,
//! and nothing here ever fails.

use std::ops::Range;

use quiver_domain::EnvironmentVariable;

/// A parsed `{{ name }}` occurrence in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    /// The trimmed name between the braces.
    name: String,
    /// Byte range of the full `{{...}}` token in the input.
    span: Range<usize>,
}

/// Resolves all `{{variable}}` placeholders in `text`.
///
/// Keys are trimmed and compared case-sensitively; whitespace inside
/// the braces is ignored. Values are substituted trimmed. When several
/// variables share a key, the first one in the list wins: the list is
/// applied in order and the first match already replaces every
/// occurrence, leaving nothing for a later duplicate. Substitution is
/// a single, non-recursive pass: a value containing something that
/// looks like a placeholder is not expanded again.
///
/// Percent-encoded braces (`%7B%7B` / `%7D%7D`) are decoded after
/// substitution so URLs copied out of a browser still resolve later.
#[must_use]
pub fn resolve_variables(text: &str, variables: &[EnvironmentVariable]) -> String {
    if text.is_empty() || variables.is_empty() {
        return text.to_string();
    }

    let placeholders = parse_placeholders(text);

    let substituted = if placeholders.is_empty() {
        text.to_string()
    } else {
        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;

        for placeholder in &placeholders {
            result.push_str(&text[last_end..placeholder.span.start]);

            if let Some(value) = lookup(variables, &placeholder.name) {
                result.push_str(value.trim());
            } else {
                // Unresolved placeholders pass through untouched.
                result.push_str(&text[placeholder.span.clone()]);
            }

            last_end = placeholder.span.end;
        }

        result.push_str(&text[last_end..]);
        result
    };

    decode_encoded_braces(&substituted)
}

/// Finds the value for a trimmed key; the first matching variable wins.
fn lookup<'a>(variables: &'a [EnvironmentVariable], name: &str) -> Option<&'a str> {
    variables
        .iter()
        .find(|v| v.key.trim() == name)
        .map(|v| v.value.as_str())
}

/// Extracts every `{{...}}` token with a non-empty trimmed name.
fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch != '{' {
            continue;
        }
        let Some((_, '{')) = chars.peek() else {
            continue;
        };
        chars.next();

        let start = i;
        let mut name = String::new();
        let mut found_end = false;

        while let Some((_, ch)) = chars.next() {
            if ch == '}' {
                if let Some((end_idx, '}')) = chars.peek() {
                    let end = *end_idx + 1;
                    chars.next();

                    let trimmed = name.trim();
                    if !trimmed.is_empty() {
                        placeholders.push(Placeholder {
                            name: trimmed.to_string(),
                            span: start..end,
                        });
                    }
                    found_end = true;
                    break;
                }
            }
            name.push(ch);
        }

        // Unclosed placeholder: nothing further can match.
        if !found_end {
            break;
        }
    }

    placeholders
}

/// Decodes percent-encoded double braces back to literals.
fn decode_encoded_braces(input: &str) -> String {
    if input.contains("%7B%7B") || input.contains("%7D%7D") {
        input.replace("%7B%7B", "{{").replace("%7D%7D", "}}")
    } else {
        input.to_string()
    }
}
