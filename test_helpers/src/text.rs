//! Decoding of quoted placeholder values captured by behavioural steps.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|inner| inner.strip_suffix(quote))
        })
        .unwrap_or(trimmed)
}

/// Unquotes a placeholder and expands `\n` and `\t` escapes so multi-line
/// configuration fragments fit on a single feature-file line.
#[must_use]
pub fn fragment(value: &str) -> String {
    unquote(value).replace("\\n", "\n").replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{fragment, unquote};

    #[rstest]
    #[case("'value'", "value")]
    #[case("\"value\"", "value")]
    #[case("  bare  ", "bare")]
    #[case("'mismatched\"", "'mismatched\"")]
    fn unquote_removes_one_matching_layer(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unquote(raw), expected);
    }

    #[rstest]
    fn fragment_expands_newline_escapes() {
        assert_eq!(fragment(r"'c:\n  val: x'"), "c:\n  val: x");
    }

    #[rstest]
    fn fragment_keeps_inner_quotes() {
        assert_eq!(
            fragment(r#"'a: {{ env "A_VAL" }}'"#),
            r#"a: {{ env "A_VAL" }}"#
        );
    }
}
