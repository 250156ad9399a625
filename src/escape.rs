//! Reversible escaping between display text and stored text.
//!
//! LPS reserves a handful of character sequences for structure (`:|` ends a
//! segment, `#` separates a name from its info, `,` separates list items,
//! `///` starts a comment, and a newline ends a line). Anything a user types is
//! run through [`encode`] before it lands between those delimiters and through
//! [`decode`] on the way back out.
//!
//! Both directions are plain literal substring replacements applied in a fixed
//! order. Each step scans the output of the previous one, so `|` first becomes
//! `/|` and the following `/` rule turns that into `/!|`. [`decode`] undoes the
//! layers in mirror order (`/!` before `/|`). Changing either order breaks the
//! round trip for text containing `/` or `|`.
//!
//! ```rust
//! use lineput::escape::{decode, encode};
//!
//! assert_eq!(encode("a|b"), "a/!|b");
//! assert_eq!(encode("x#1,y"), "x/id1/comy");
//! assert_eq!(decode(&encode(":|\t/")), ":|\t/");
//! ```

/// Segment delimiter: ends a header or a child segment.
pub const SEGMENT_DELIMITER: &str = ":|";

/// Separates a name from its stored info.
pub const INFO_SEPARATOR: char = '#';

/// Separates the items of a multi-valued info.
pub const LIST_SEPARATOR: char = ',';

/// Starts the comment at the end of a line.
pub const COMMENT_MARKER: &str = "///";

const ENCODE_RULES: [(&str, &str); 8] = [
    ("|", "/|"),
    ("/", "/!"),
    (":|", "/stop"),
    ("\t", "/tab"),
    ("\n", "/n"),
    ("\r", "/r"),
    ("#", "/id"),
    (",", "/com"),
];

// `/equ` is still read for files written by older tools; `=` is never escaped.
const DECODE_RULES: [(&str, &str); 9] = [
    ("/stop", ":|"),
    ("/equ", "="),
    ("/tab", "\t"),
    ("/n", "\n"),
    ("/r", "\r"),
    ("/id", "#"),
    ("/com", ","),
    ("/!", "/"),
    ("/|", "|"),
];

/// Converts display text into stored text that is safe between delimiters.
#[must_use]
pub fn encode(display: &str) -> String {
    apply(display, &ENCODE_RULES)
}

/// Converts stored text back into display text.
#[must_use]
pub fn decode(stored: &str) -> String {
    apply(stored, &DECODE_RULES)
}

fn apply(input: &str, rules: &[(&str, &str)]) -> String {
    let mut text = input.to_string();
    for (from, to) in rules {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_is_layered_through_slash_rule() {
        assert_eq!(encode("|"), "/!|");
        assert_eq!(decode("/!|"), "|");
    }

    #[test]
    fn test_delimiter_never_survives_encoding() {
        let stored = encode(":|");
        assert!(!stored.contains(SEGMENT_DELIMITER));
        assert_eq!(decode(&stored), ":|");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(encode("a\tb\nc\rd"), "a/tabb/nc/rd");
        assert_eq!(decode("a/tabb/nc/rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_id_and_comma() {
        assert_eq!(encode("#1,2"), "/id1/com2");
        assert_eq!(decode("/id1/com2"), "#1,2");
    }

    #[test]
    fn test_slash_sequences_that_look_like_escapes() {
        for display in ["/n", "/tab", "/stop", "/com", "/id", "/!", "/|", "//"] {
            assert_eq!(decode(&encode(display)), display, "input {:?}", display);
        }
    }

    #[test]
    fn test_legacy_equ_is_decoded_but_never_written() {
        assert_eq!(decode("a/equb"), "a=b");
        assert_eq!(encode("a=b"), "a=b");
    }

    #[test]
    fn test_comment_marker_cannot_appear_in_stored_text() {
        let stored = encode("///");
        assert!(!stored.contains(COMMENT_MARKER));
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(encode("我的电脑"), "我的电脑");
        assert_eq!(decode("我的电脑"), "我的电脑");
    }
}
