//! Fixed-order cleanup of comment text before rendering.
//!
//! The host doc parser leaves several artifacts in raw comment text: one
//! space of re-indentation after every newline, `{at}` / `{slash}` escape
//! tokens, an escaped comment terminator (`*\/` cannot appear literally
//! inside a comment body), and `{@literal ...}` wrappers. Each artifact is
//! undone by a named step; the steps run in a fixed order that is part of
//! the contract (token substitution must happen after continuation-space
//! removal).

use std::sync::LazyLock;

use regex::Regex;

static COMMENT_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^( *)\*\\/$").unwrap());

static LITERAL_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@literal (.*?)\}").unwrap());

/// A single named sanitization step.
pub struct SanitizeStep {
    /// Step name, stable across releases.
    pub name: &'static str,
    apply: fn(&str) -> String,
}

impl SanitizeStep {
    /// Run this step on its own.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        (self.apply)(input)
    }
}

/// The sanitization pipeline, in execution order.
pub const PIPELINE: &[SanitizeStep] = &[
    SanitizeStep {
        name: "trim",
        apply: |input| input.trim().to_owned(),
    },
    SanitizeStep {
        name: "continuation-space",
        // Removes exactly one space after each newline; extra spaces stay.
        apply: |input| input.replace("\n ", "\n"),
    },
    SanitizeStep {
        name: "at-token",
        apply: |input| input.replace("{at}", "&#64;"),
    },
    SanitizeStep {
        name: "slash-token",
        apply: |input| input.replace("{slash}", "/"),
    },
    SanitizeStep {
        name: "comment-terminator",
        apply: |input| COMMENT_TERMINATOR.replace_all(input, "${1}*/").into_owned(),
    },
    SanitizeStep {
        name: "literal-unwrap",
        // Non-greedy, so each wrapper resolves independently. An
        // unterminated wrapper never matches and is left as-is.
        apply: |input| LITERAL_WRAPPER.replace_all(input, "${1}").into_owned(),
    },
];

/// Run the full pipeline in order.
#[must_use]
pub fn sanitize(input: &str) -> String {
    PIPELINE
        .iter()
        .fold(input.to_owned(), |text, step| step.apply(&text))
}

/// Names of the pipeline steps, in execution order.
pub fn step_names() -> impl Iterator<Item = &'static str> {
    PIPELINE.iter().map(|step| step.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_composed_step_order() {
        let names: Vec<&str> = step_names().collect();
        assert_eq!(
            names,
            vec![
                "trim",
                "continuation-space",
                "at-token",
                "slash-token",
                "comment-terminator",
                "literal-unwrap",
            ]
        );
    }

    #[test]
    fn test_trim_and_continuation_space() {
        assert_eq!(sanitize("  text\n text2  "), "text\ntext2");
    }

    #[test]
    fn test_continuation_removes_exactly_one_space() {
        // Two spaces after the newline: only the first is removed.
        assert_eq!(sanitize("a\n  text"), "a\n text");
    }

    #[test]
    fn test_at_token() {
        assert_eq!(sanitize("{at}Example"), "&#64;Example");
    }

    #[test]
    fn test_slash_token() {
        assert_eq!(sanitize("{slash}path"), "/path");
    }

    #[test]
    fn test_comment_terminator_restored() {
        assert_eq!(sanitize("x\n   *\\/\ny"), "x\n  */\ny");
    }

    #[test]
    fn test_comment_terminator_step_keeps_leading_spaces() {
        let step = &PIPELINE[4];
        assert_eq!(step.name, "comment-terminator");
        assert_eq!(step.apply("   *\\/"), "   */");
    }

    #[test]
    fn test_comment_terminator_requires_end_of_line() {
        assert_eq!(sanitize("x\n *\\/ trailing"), "x\n*\\/ trailing");
    }

    #[test]
    fn test_literal_unwrap() {
        assert_eq!(sanitize("{@literal @}Override"), "@Override");
        assert_eq!(sanitize("a {@literal *not bold*} b"), "a *not bold* b");
    }

    #[test]
    fn test_literal_unwrap_is_non_greedy() {
        assert_eq!(sanitize("{@literal a} and {@literal b}"), "a and b");
    }

    #[test]
    fn test_unterminated_literal_left_as_is() {
        assert_eq!(sanitize("{@literal unclosed"), "{@literal unclosed");
    }

    #[test]
    fn test_token_substitution_runs_before_literal_unwrap() {
        // Were the order reversed, the wrapper would resolve first and the
        // leftover "{at}" token would never be substituted.
        assert_eq!(sanitize("{@literal {at}}"), "&#64;");
    }

    #[test]
    fn test_individual_step_apply() {
        let trim = &PIPELINE[0];
        assert_eq!(trim.name, "trim");
        assert_eq!(trim.apply("  x  "), "x");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n  "), "");
    }
}
