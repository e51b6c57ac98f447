//! Caret and line-break helpers shared by reflow operations.
//!
//! Carets count chars; slicing needs bytes. Everything that crosses that
//! boundary goes through here.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// `\x0C` is the page-break marker of the serialized form and must never
// appear inside page content.
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n?|\x0C").expect("valid line break regex"));

/// Rewrites `\r\n`, lone `\r` and page-break markers to `\n`.
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    LINE_BREAK_RE.replace_all(text, "\n")
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of char offset `caret`, clamped to the end of `text`.
pub fn byte_offset(text: &str, caret: usize) -> usize {
    text.char_indices()
        .nth(caret)
        .map_or(text.len(), |(index, _)| index)
}

/// Normalizes `text` and maps `caret` onto the normalized text.
pub fn normalize_with_caret(text: &str, caret: usize) -> (String, usize) {
    let mut split = byte_offset(text, caret);
    // A caret inside a CRLF pair belongs after it.
    if split > 0 && text[..split].ends_with('\r') && text[split..].starts_with('\n') {
        split += 1;
    }
    let head = normalize_line_breaks(&text[..split]);
    let tail = normalize_line_breaks(&text[split..]);
    let caret = char_len(&head);
    (format!("{head}{tail}"), caret)
}

/// Char offset where the last logical line of `text` starts.
pub fn last_line_start(text: &str) -> usize {
    text.rfind('\n')
        .map_or(0, |index| char_len(&text[..index + 1]))
}

#[cfg(test)]
mod tests {
    use super::{byte_offset, last_line_start, normalize_line_breaks, normalize_with_caret};

    #[test]
    fn normalizes_crlf_cr_and_page_breaks() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc\x0Cd"), "a\nb\nc\nd");
    }

    #[test]
    fn byte_offset_handles_multibyte_and_clamps() {
        assert_eq!(byte_offset("日本語", 1), 3);
        assert_eq!(byte_offset("abc", 10), 3);
    }

    #[test]
    fn caret_survives_crlf_collapse() {
        let (text, caret) = normalize_with_caret("a\r\nb\r\nc", 7);
        assert_eq!(text, "a\nb\nc");
        assert_eq!(caret, 5);

        let (_, caret) = normalize_with_caret("a\r\nb\r\nc", 4);
        assert_eq!(caret, 3);

        let (text, caret) = normalize_with_caret("a\r\nb", 2);
        assert_eq!(text, "a\nb");
        assert_eq!(caret, 2);
    }

    #[test]
    fn last_line_start_points_after_final_break() {
        assert_eq!(last_line_start("ab\ncd"), 3);
        assert_eq!(last_line_start("single"), 0);
        assert_eq!(last_line_start("x\n"), 2);
    }
}
