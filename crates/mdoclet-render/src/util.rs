//! Small shared helpers for HTML emission.

/// Escape text for inclusion in HTML output.
///
/// Besides the usual `& < > "`, the `@` character is emitted as its entity:
/// the rendered buffer is substituted back as the symbol's doc source, and a
/// bare `@` there would be picked up again by the host's tag recognition.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '@' => out.push_str("&#64;"),
            _ => out.push(c),
        }
    }
    out
}

/// Derive a heading id slug: lowercase alphanumerics with `-` separators.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html_basics() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_escape_html_at_sign() {
        assert_eq!(escape_html("@param"), "&#64;param");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Section Title"), "section-title");
        assert_eq!(slugify("  FAQ!  "), "faq");
        assert_eq!(slugify("a--b"), "a-b");
    }
}
