use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::parser::normalize::normalize_line_endings;

static HTML_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=\n|\n|=$").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode RFC 2047 encoded words in a single header line.
pub fn decode_mime_words(raw: &str) -> String {
    // mailparse expects a full "Key: value" header line
    let mut line = b"X: ".to_vec();
    line.extend_from_slice(raw.as_bytes());
    line.extend_from_slice(b"\r\n");

    match mailparse::parse_header(&line) {
        Ok((h, _idx)) => h.get_value(),
        Err(e) => {
            warn!("could not decode header words {raw:?}: {e}");
            raw.to_string()
        }
    }
}

/// Decode a Subject value folded over several lines of encoded words.
pub fn decode_subject(raw: &str) -> String {
    raw.split('\n')
        .map(|line| {
            if line.contains("=?") {
                decode_mime_words(line.trim())
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Decode `=XX` escapes and soft line breaks. Malformed input is returned as is.
pub fn decode_quoted_printable(text: &str) -> String {
    match quoted_printable::decode(text.as_bytes(), quoted_printable::ParseMode::Robust) {
        Ok(bytes) => normalize_line_endings(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            warn!("quoted-printable decode failed, keeping raw text: {e}");
            text.to_string()
        }
    }
}

/// Flatten an HTML body to one line and drop anything after the closing `</html>`.
pub fn flatten_html(html: &str) -> String {
    let joined = HTML_BREAKS.replace_all(html, "");
    let collapsed = WHITESPACE.replace_all(&joined, " ");

    const CLOSE: &str = "</html>";
    match collapsed.to_ascii_lowercase().rfind(CLOSE) {
        Some(idx) => collapsed[..idx + CLOSE.len()].to_string(),
        None => collapsed.into_owned(),
    }
}
