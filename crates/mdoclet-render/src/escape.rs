//! Heuristic escaping of annotation-like tokens.
//!
//! Raw comment text frequently contains source-code annotations such as
//! `@Override` that the host doc parser would otherwise swallow as metadata
//! tags. Before the host splits tags, every `@` followed by an uppercase
//! letter is wrapped in `{@literal ...}`; the sanitizer's `literal-unwrap`
//! step restores the bare text later, so the sequence survives the round
//! trip unharmed.

/// Whether a character starting a candidate tag name needs literal escaping.
///
/// Structural tag names begin with a lowercase letter by convention, so an
/// uppercase letter marks the token as annotation-like. This is a heuristic:
/// a custom tag deliberately named with a leading uppercase letter cannot be
/// distinguished from an unrelated token here, since the true set of tag
/// names is external domain knowledge.
fn needs_literal_escape(first: char) -> bool {
    first.is_ascii_uppercase()
}

/// Wrap every `@<Uppercase>` occurrence in a `{@literal ...}` wrapper.
///
/// `@` followed by anything else (including lowercase tag names such as
/// `@param`) is left untouched. No other characters are affected.
#[must_use]
pub fn escape_tag_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '@' && chars.peek().is_some_and(|&next| needs_literal_escape(next)) {
            out.push_str("{@literal @}");
        } else {
            out.push(c);
        }
    }

    out
}
