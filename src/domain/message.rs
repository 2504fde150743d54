use std::collections::BTreeMap;

use serde::Serialize;

/// Header field name (as written in the message) to its decoded value.
pub type HeaderMap = BTreeMap<String, String>;

/// Exact-case lookup first, then any case variant of `name`.
pub fn find_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .or_else(|| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
        .map(String::as_str)
}

/// A decomposed message: top-level header fields plus its body parts.
///
/// Serializes flat, one member per header field and a `parts` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(flatten)]
    pub headers: HeaderMap,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Part {
    pub headers: HeaderMap,
    pub body: String,
    /// Only filled by nested decoding.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl Part {
    pub fn new(headers: HeaderMap, body: String) -> Self {
        Self {
            headers,
            body,
            parts: Vec::new(),
        }
    }

    /// Boundary-adjacent artifacts carry neither headers nor content.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.body.is_empty() && self.parts.is_empty()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Metadata derived from a parsed message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageSummary {
    pub uuid: String,
    pub subject: String,
    pub date_utc: Option<String>,
    pub from_name: String,
    pub from_email: String,
    pub to_email: String,
    pub mime_type: String,
    pub snippet: String,
}

/// Message plus its summary, as emitted by `parse --summary`.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizedMessage {
    #[serde(flatten)]
    pub message: Message,
    pub summary: MessageSummary,
}
