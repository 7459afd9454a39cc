//! Punctuation normalization for extracted poems.
//!
//! Removes whitespace before clause punctuation, enforces a single space
//! after it, collapses whitespace runs, trims, and makes sure the text ends
//! like a sentence. Wording and capitalization are never touched.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace sitting directly in front of a clause mark.
static SPACE_BEFORE_MARK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").unwrap());

/// A run of clause marks glued to the next word.
///
/// The run is matched as a whole so that "..." or "?!" never gets split
/// apart by an inserted space.
static MISSING_SPACE_AFTER_MARK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,!?;:]+)([^\s.,!?;:])").unwrap());

/// Regex to collapse whitespace runs into one space.
static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clause marks that never follow whitespace.
const MARKS: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Characters that may end a normalized text.
const TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Normalize punctuation and whitespace of `text`.
///
/// Shorthand for `TextNormalizer::new().normalize(text)`.
pub fn normalize(text: &str) -> String {
    TextNormalizer::new().normalize(text)
}

/// Punctuation normalizer for extracted poems.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    /// Whether to keep line boundaries instead of folding everything
    /// into a single line.
    preserve_line_breaks: bool,
}

impl TextNormalizer {
    /// Create a normalizer that folds all whitespace, line breaks included.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to preserve original line breaks.
    pub fn with_preserve_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Normalize a piece of extracted text.
    ///
    /// - Removes whitespace before `. , ! ? ; :`
    /// - Inserts one space after a run of those marks when a word follows
    /// - Collapses whitespace runs to single spaces
    /// - Trims leading/trailing whitespace
    /// - Appends `.` to non-empty text not ending in `.`, `?` or `!`
    ///
    /// With line breaks preserved, the first four rules apply to each line,
    /// blank lines are dropped, and only the last line gets a terminator.
    /// A line opening with a mark is pulled up onto the line before it.
    pub fn normalize(&self, text: &str) -> String {
        let body = if self.preserve_line_breaks {
            tidy_lines(text)
        } else {
            tidy(text)
        };

        terminate(body)
    }

    /// Normalize text and split it into the lines of a poem.
    ///
    /// Empty text yields no lines.
    pub fn normalize_to_lines(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize(text);

        if normalized.is_empty() {
            return Vec::new();
        }

        normalized.split('\n').map(str::to_string).collect()
    }
}

/// Apply the mark-spacing and whitespace rules, in order.
///
/// Collapsing runs last keeps the spaces inserted after marks from ever
/// doubling up.
fn tidy(text: &str) -> String {
    let text = SPACE_BEFORE_MARK_REGEX.replace_all(text, "${1}");
    let text = MISSING_SPACE_AFTER_MARK_REGEX.replace_all(&text, "${1} ${2}");
    let text = WHITESPACE_RUN_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// Tidy each line on its own, keeping the breaks between them.
fn tidy_lines(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines().map(tidy).filter(|line| !line.is_empty()) {
        // A break in front of a mark is whitespace before it
        if line.starts_with(MARKS) {
            if let Some(previous) = lines.last_mut() {
                previous.push_str(&line);
                continue;
            }
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Append a full stop unless the text is empty or already terminated.
fn terminate(mut text: String) -> String {
    if !text.is_empty() && !text.ends_with(TERMINATORS) {
        text.push('.');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\n\t \r\n"), "");
    }

    #[test]
    fn test_space_before_comma() {
        assert_eq!(normalize("Hello ,world"), "Hello, world.");
    }

    #[test]
    fn test_missing_space_after_period() {
        assert_eq!(normalize("Line one.Line two"), "Line one. Line two.");
    }

    #[test]
    fn test_already_punctuated_is_unchanged() {
        assert_eq!(normalize("Already done."), "Already done.");
        assert_eq!(normalize("Is it done?"), "Is it done?");
        assert_eq!(normalize("It is done!"), "It is done!");
    }

    #[test]
    fn test_terminator_appended() {
        assert_eq!(normalize("no terminator here"), "no terminator here.");
    }

    #[test]
    fn test_capitalization_untouched() {
        assert_eq!(
            normalize("Hello ,world !how are you"),
            "Hello, world! how are you."
        );
    }

    #[test]
    fn test_multiple_spaces_before_mark() {
        assert_eq!(normalize("wait   ;   then"), "wait; then.");
    }

    #[test]
    fn test_mark_runs_stay_together() {
        assert_eq!(normalize("Wait...what"), "Wait... what.");
        assert_eq!(normalize("Really ?!Yes"), "Really?! Yes.");
        assert_eq!(normalize("a , , b"), "a,, b.");
    }

    #[test]
    fn test_trailing_non_terminal_mark() {
        assert_eq!(normalize("and so,"), "and so,.");
        assert_eq!(normalize("as follows :"), "as follows:.");
    }

    #[test]
    fn test_line_breaks_folded_by_default() {
        assert_eq!(
            normalize("The rose is red\nThe night is long"),
            "The rose is red The night is long."
        );
    }

    #[test]
    fn test_preserve_line_breaks() {
        let normalizer = TextNormalizer::new().with_preserve_line_breaks(true);

        assert_eq!(
            normalizer.normalize("The rose is red ,\r\n\r\nthe night   is long"),
            "The rose is red,\nthe night is long."
        );
    }

    #[test]
    fn test_preserve_line_breaks_pulls_up_leading_marks() {
        let normalizer = TextNormalizer::new().with_preserve_line_breaks(true);

        assert_eq!(
            normalizer.normalize("the moon\n, the tide"),
            "the moon, the tide."
        );
        assert_eq!(
            normalizer.normalize("the moon\n\n  ;\nthe tide\n!"),
            "the moon;\nthe tide!"
        );
        assert_eq!(normalizer.normalize(", first\nsecond"), ", first\nsecond.");
    }

    #[test]
    fn test_normalize_to_lines() {
        let normalizer = TextNormalizer::new().with_preserve_line_breaks(true);

        let lines = normalizer.normalize_to_lines("O moon ,\nO tide\n\n");
        assert_eq!(lines, vec!["O moon,", "O tide."]);
    }

    #[test]
    fn test_normalize_to_lines_empty() {
        let normalizer = TextNormalizer::new();
        assert!(normalizer.normalize_to_lines("  \n ").is_empty());
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(normalize("Привет ,мир"), "Привет, мир.");
        assert_eq!(normalize("花 .月"), "花. 月.");
    }

    fn check_invariants(t: &str) {
        let chars: Vec<char> = t.chars().collect();

        for pair in chars.windows(2) {
            assert!(
                !(pair[0].is_whitespace() && MARKS.contains(&pair[1])),
                "whitespace before mark in {t:?}"
            );
            assert!(
                !(pair[0].is_whitespace() && pair[1].is_whitespace()),
                "double whitespace in {t:?}"
            );
        }

        assert_eq!(t, t.trim());

        if let Some(last) = chars.last() {
            assert!(TERMINATORS.contains(last), "unterminated {t:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(s in ".*") {
            check_invariants(&normalize(&s));
        }

        #[test]
        fn prop_invariants_hold_on_punctuated_text(s in "[a-z .,!?;:\t\n]{0,40}") {
            check_invariants(&normalize(&s));
        }

        #[test]
        fn prop_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_idempotent_on_punctuated_text(s in "[a-z .,!?;:\t\n]{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_preserving_mode_invariants_hold(s in "[a-z .,!?;:\t\r\n]{0,40}") {
            let normalizer = TextNormalizer::new().with_preserve_line_breaks(true);
            check_invariants(&normalizer.normalize(&s));
        }

        #[test]
        fn prop_preserving_mode_idempotent(s in "[a-z .,!?;:\r\n]{0,40}") {
            let normalizer = TextNormalizer::new().with_preserve_line_breaks(true);
            let once = normalizer.normalize(&s);
            prop_assert_eq!(normalizer.normalize(&once), once);
        }
    }
}
