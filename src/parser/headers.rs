use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::domain::message::HeaderMap;
use crate::mail::decoders::decode_subject;

/// A capitalized token at line start, up to the first colon on that line.
static MESSAGE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Z][A-Za-z\-]+.*?):").unwrap());

/// Body-part blocks may carry preamble text, so only `Content-*` fields count.
static PART_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(Content-+.*?):").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderScope {
    Message,
    Part,
}

/// One sliced header field with its byte span inside the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub key: String,
    pub start: usize,
    pub end: usize,
    pub value: String,
}

/// Field names in order of first appearance, without duplicates.
pub fn scan_keys(block: &str, scope: HeaderScope) -> Vec<String> {
    let pattern = match scope {
        HeaderScope::Message => &*MESSAGE_KEY,
        HeaderScope::Part => &*PART_KEY,
    };

    let mut keys: Vec<String> = Vec::new();
    for caps in pattern.captures_iter(block) {
        let key = &caps[1];
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Slice each key's value out of the block.
///
/// A value runs from its key's line to the line of the next key (or the end of
/// the block). Keys are located in order; a key that cannot be found after the
/// previous one is skipped, so spans never overlap.
pub fn slice_fields(keys: &[String], block: &str) -> Vec<HeaderField> {
    let mut located: Vec<(&str, usize)> = Vec::with_capacity(keys.len());
    let mut cursor = 0;
    for key in keys {
        match find_key_line(block, key, cursor) {
            Some(pos) => {
                located.push((key.as_str(), pos));
                cursor = pos + key.len();
            }
            None => debug!("header key {key:?} not found after offset {cursor}, skipping"),
        }
    }

    located
        .iter()
        .enumerate()
        .map(|(i, &(key, start))| {
            let end = located.get(i + 1).map_or(block.len(), |&(_, next)| next);
            HeaderField {
                key: key.to_string(),
                start,
                end,
                value: field_value(key, &block[start..end]),
            }
        })
        .collect()
}

/// Scan and slice a header block into a map.
pub fn parse_header_block(block: &str, scope: HeaderScope) -> HeaderMap {
    let keys = scan_keys(block, scope);
    debug!("{scope:?} header keys: {keys:?}");
    slice_fields(&keys, block)
        .into_iter()
        .map(|field| (field.key, field.value))
        .collect()
}

fn find_key_line(block: &str, key: &str, from: usize) -> Option<usize> {
    let field = format!("{key}:");
    if from == 0 && block.starts_with(&field) {
        return Some(0);
    }
    block[from..]
        .find(&format!("\n{field}"))
        .map(|idx| from + idx + 1)
}

fn field_value(key: &str, chunk: &str) -> String {
    let raw = chunk
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(chunk);
    let value = raw.trim();
    let value = value.strip_suffix(';').unwrap_or(value).trim_end();

    if key.eq_ignore_ascii_case("subject") {
        decode_subject(value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BLOCK: &str = "Return-Path: <a@example.com>\n\
Content-Type: multipart/alternative;\n\
\tboundary=\"Apple-Mail=_1\"\n\
Subject: Hello\n\
Date: Mon, 4 Mar 2013 10:00:00 +0100\n\
Received: from a\n\
Received: from b";

    #[test]
    fn test_scan_message_keys() {
        assert_eq!(
            scan_keys(BLOCK, HeaderScope::Message),
            vec!["Return-Path", "Content-Type", "Subject", "Date", "Received"]
        );
    }

    #[test]
    fn test_scan_part_keys_ignores_preamble() {
        let block = "This is a multi-part message in MIME format.\n\
Note: not a header\n\
Content-Type: text/plain;\n\
\tcharset=us-ascii\n\
Content-Transfer-Encoding: 7bit";
        assert_eq!(
            scan_keys(block, HeaderScope::Part),
            vec!["Content-Type", "Content-Transfer-Encoding"]
        );
    }

    #[test]
    fn test_scan_no_keys() {
        assert!(scan_keys("just some text\nmore text", HeaderScope::Message).is_empty());
        assert!(scan_keys("", HeaderScope::Part).is_empty());
        assert!(parse_header_block("lowercase: no", HeaderScope::Message).is_empty());
    }

    #[test]
    fn test_slice_spans_are_contiguous() {
        let keys = scan_keys(BLOCK, HeaderScope::Message);
        let fields = slice_fields(&keys, BLOCK);
        assert_eq!(fields.len(), keys.len());
        assert_eq!(fields[0].start, 0);
        for pair in fields.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(fields.last().unwrap().end, BLOCK.len());
    }

    #[test]
    fn test_slice_values() {
        let headers = parse_header_block(BLOCK, HeaderScope::Message);
        assert_eq!(headers["Return-Path"], "<a@example.com>");
        assert_eq!(
            headers["Content-Type"],
            "multipart/alternative;\n\tboundary=\"Apple-Mail=_1\""
        );
        assert_eq!(headers["Subject"], "Hello");
        assert_eq!(headers["Date"], "Mon, 4 Mar 2013 10:00:00 +0100");
        // Repeated fields keep the first key; the value runs to the next distinct key.
        assert_eq!(headers["Received"], "from a\nReceived: from b");
    }

    #[test]
    fn test_trailing_semicolon_is_dropped() {
        let headers = parse_header_block("Content-Type: text/plain;\n", HeaderScope::Part);
        assert_eq!(headers["Content-Type"], "text/plain");
    }

    #[test]
    fn test_key_with_regex_metacharacters() {
        let block = "X-Weird(1)+: a\nX-Other.*: b";
        let headers = parse_header_block(block, HeaderScope::Message);
        assert_eq!(headers["X-Weird(1)+"], "a");
        assert_eq!(headers["X-Other.*"], "b");
    }

    #[test]
    fn test_missing_key_is_skipped() {
        let keys = vec!["Subject".to_string(), "Missing".to_string(), "Date".to_string()];
        let fields = slice_fields(&keys, "Subject: a\nDate: b");
        let names: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(names, vec!["Subject", "Date"]);
        assert_eq!(fields[0].value, "a");
        assert_eq!(fields[1].value, "b");
    }

    #[test]
    fn test_encoded_subject() {
        let block = "Subject: =?utf-8?Q?Caf=C3=A9?=\n =?utf-8?B?TGF0dGU=?=\nDate: x";
        let headers = parse_header_block(block, HeaderScope::Message);
        assert_eq!(headers["Subject"], "CaféLatte");
        assert_eq!(headers["Date"], "x");
    }
}
