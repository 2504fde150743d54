use std::sync::LazyLock;

use regex::Regex;

/// Start of the plist footer Apple Mail appends after the MIME body.
static XML_FOOTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\?xml|xml ").unwrap());

/// Collapse `\r\n` terminators to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Split at the first blank line.
///
/// Returns the header block and everything after the blank line, verbatim.
/// Without a blank line the whole text is the header block and the body is empty.
pub fn split_header_body(text: &str) -> (&str, &str) {
    match text.find("\n\n") {
        Some(idx) => (&text[..idx], &text[idx + 2..]),
        None => (text, ""),
    }
}

/// Cut the trailing XML footer off a message body and trim trailing whitespace.
pub fn strip_footer(body: &str) -> &str {
    let body = match XML_FOOTER.find(body) {
        Some(m) => &body[..m.start()],
        None => body,
    };
    body.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\r\n\r\nc"), "a\nb\n\nc");
        assert_eq!(normalize_line_endings("a\nb\n"), "a\nb\n");
        let once = normalize_line_endings("x\r\ny\r\n");
        assert_eq!(normalize_line_endings(&once), once);
    }

    #[test]
    fn test_split_uses_first_blank_line() {
        let (header, body) = split_header_body("A: 1\nB: 2\n\nfirst\n\nsecond");
        assert_eq!(header, "A: 1\nB: 2");
        assert_eq!(body, "first\n\nsecond");
    }

    #[test]
    fn test_split_without_blank_line() {
        assert_eq!(split_header_body("A: 1\nB: 2"), ("A: 1\nB: 2", ""));
        assert_eq!(split_header_body(""), ("", ""));
    }

    #[test]
    fn test_strip_footer() {
        let body = "Hello\n\n\n<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<plist/>";
        assert_eq!(strip_footer(body), "Hello");
        assert_eq!(strip_footer("Hello there  \n\n"), "Hello there");
        assert_eq!(strip_footer("Hello\nxml version=\"1.0\"?>"), "Hello");
    }

    #[test]
    fn test_strip_footer_cuts_at_prose_mention_of_xml() {
        // Known false positive of the footer marker.
        assert_eq!(strip_footer("Please send the xml file"), "Please send the");
        assert_eq!(strip_footer("An XML file"), "An XML file");
    }
}
