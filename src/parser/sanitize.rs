//! Text cleanup for extracted article fields
//!
//! Body text pulled out of the DOM keeps the page's indentation, stray
//! entities and invisible characters. `clean_body` turns it into plain
//! paragraphs; `clean_inline` squeezes a field (title, topic) onto one line.

use regex::Regex;
use std::sync::LazyLock;

static SPACES_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").unwrap());

static MULTI_NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean multi-line body text
///
/// Removes invisible and control characters, decodes leftover HTML entities,
/// collapses runs of spaces, trims every line and keeps at most one blank
/// line between paragraphs.
///
/// # Examples
///
/// ```
/// use newsmorph::parser::sanitize::clean_body;
///
/// let dirty = "  Первый\u{200B} абзац &amp; ещё  \n\n\n\n   Второй  ";
/// assert_eq!(clean_body(dirty), "Первый абзац & ещё\n\nВторой");
/// ```
pub fn clean_body(text: &str) -> String {
    let text = remove_invisible(text);
    let text = html_escape::decode_html_entities(&text);
    let text = SPACES_REGEX.replace_all(&text, " ");
    let text = text
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    MULTI_NEWLINE_REGEX
        .replace_all(&text, "\n\n")
        .trim()
        .to_string()
}

/// Clean a single-line field
///
/// # Examples
///
/// ```
/// use newsmorph::parser::sanitize::clean_inline;
///
/// assert_eq!(clean_inline("\n   Мэр  открыл\n парк  "), "Мэр открыл парк");
/// ```
pub fn clean_inline(text: &str) -> String {
    let text = remove_invisible(text);
    let text = html_escape::decode_html_entities(&text);
    crate::utils::normalize_whitespace(&text)
}

/// Remove zero-width characters, BOMs and control characters other than `\n` and `\t`
pub fn remove_invisible(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Check if text contains anything besides whitespace
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_invisible() {
        assert_eq!(remove_invisible("а\u{200B}б\u{FEFF}в"), "абв");
        assert_eq!(remove_invisible("x\x00y\x07z"), "xyz");
        assert_eq!(remove_invisible("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn test_clean_body_entities() {
        assert_eq!(clean_body("&laquo;Цитата&raquo;&nbsp;конец"), "«Цитата» конец");
    }

    #[test]
    fn test_clean_body_crlf_and_blank_lines() {
        let text = "\r\n\r\n  Строка 1  \r\n\r\n\r\n\r\nСтрока 2\r\n";
        assert_eq!(clean_body(text), "Строка 1\n\nСтрока 2");
    }

    #[test]
    fn test_clean_body_only_whitespace() {
        assert_eq!(clean_body(" \n\t \n "), "");
    }

    #[test]
    fn test_clean_inline() {
        assert_eq!(clean_inline("  Заголовок\n  новости  "), "Заголовок новости");
        assert_eq!(clean_inline("A &amp; B"), "A & B");
    }

    #[test]
    fn test_has_content() {
        assert!(has_content("текст"));
        assert!(!has_content(""));
        assert!(!has_content("\n\t  \r"));
    }
}
