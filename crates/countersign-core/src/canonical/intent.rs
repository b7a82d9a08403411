//! Canonicalization of human-entered approval intent text.
//!
//! The intent string is typed by a person, so the same approval intent can
//! arrive as many different byte sequences: decomposed Unicode from one
//! input method, `\r\n` line endings from one platform, doubled spaces from
//! an editor. The digest of the intent must be stable across all of them.
//!
//! Rules, applied in exactly this order:
//!
//! 1. Unicode-normalize to composed form (NFC)
//! 2. Convert `\r\n` and bare `\r` to a single `\n`
//! 3. Collapse runs of non-newline whitespace to one space
//! 4. Trim leading and trailing whitespace
//!
//! The order is load-bearing: NFC can surface whitespace variants (e.g.
//! `U+00A0` stays distinct, but compatibility characters decomposed upstream
//! may produce spaces), so normalization runs before whitespace collapse.

use unicode_normalization::UnicodeNormalization;

/// Canonicalizes intent text so that digesting the result is stable across
/// superficial formatting variance.
///
/// Idempotent: `canonicalize_intent(canonicalize_intent(t))` equals
/// `canonicalize_intent(t)` for all `t`.
#[must_use]
pub fn canonicalize_intent(text: &str) -> String {
    // 1. NFC normalization.
    let composed: String = text.nfc().collect();

    // 2. Line terminators to `\n`.
    let unixed = composed.replace("\r\n", "\n").replace('\r', "\n");

    // 3. Collapse runs of non-newline whitespace.
    let mut collapsed = String::with_capacity(unixed.len());
    let mut in_space_run = false;
    for c in unixed.chars() {
        if c == '\n' {
            collapsed.push('\n');
            in_space_run = false;
        } else if c.is_whitespace() {
            if !in_space_run {
                collapsed.push(' ');
                in_space_run = true;
            }
        } else {
            collapsed.push(c);
            in_space_run = false;
        }
    }

    // 4. Trim.
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(canonicalize_intent("Approve X"), "Approve X");
    }

    #[test]
    fn line_endings_are_unified() {
        assert_eq!(
            canonicalize_intent("line one\r\nline two\rline three\n"),
            "line one\nline two\nline three"
        );
    }

    #[test]
    fn whitespace_runs_collapse_to_one_space() {
        assert_eq!(
            canonicalize_intent("Approve   the\t\tcontract"),
            "Approve the contract"
        );
    }

    #[test]
    fn newlines_survive_collapse() {
        assert_eq!(canonicalize_intent("a  b\nc   d"), "a b\nc d");
    }

    #[test]
    fn leading_and_trailing_whitespace_trimmed() {
        assert_eq!(canonicalize_intent("  Approve X \t "), "Approve X");
    }

    #[test]
    fn nfc_composes_decomposed_input() {
        // "é" as 'e' + combining acute vs precomposed U+00E9.
        let decomposed = "Approuv\u{0065}\u{0301}";
        let composed = "Approuv\u{00e9}";
        assert_eq!(
            canonicalize_intent(decomposed),
            canonicalize_intent(composed)
        );
        assert_eq!(canonicalize_intent(decomposed), composed);
    }

    #[test]
    fn equivalent_inputs_canonicalize_identically() {
        let variants = [
            "Approve the Q3 budget",
            "  Approve the Q3 budget",
            "Approve  the\tQ3 budget\r\n",
            "Approve the Q3 budget   ",
        ];
        let canonical = canonicalize_intent(variants[0]);
        for v in &variants {
            assert_eq!(canonicalize_intent(v), canonical, "variant {v:?} diverged");
        }
    }

    #[test]
    fn idempotent_on_fixed_cases() {
        let cases = ["", "  ", "a\r\nb", "x \u{00a0} y", "tab\there"];
        for c in &cases {
            let once = canonicalize_intent(c);
            assert_eq!(canonicalize_intent(&once), once, "input {c:?} not stable");
        }
    }

    #[test]
    fn nonbreaking_space_collapses_like_space() {
        assert_eq!(canonicalize_intent("a\u{00a0}\u{00a0}b"), "a b");
    }

    #[test]
    fn empty_and_whitespace_only_become_empty() {
        assert_eq!(canonicalize_intent(""), "");
        assert_eq!(canonicalize_intent(" \r\n\t "), "");
    }
}
