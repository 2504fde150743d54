use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat};
use regex::Regex;
use sha1::{Digest, Sha1};

use crate::domain::message::{Message, MessageSummary, Part};
use crate::mail::decoders::{decode_mime_words, decode_quoted_printable};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\S+@\S+\.\S\S+\b").unwrap());

const SNIPPET_CHARS: usize = 140;

pub fn summarize(msg: &Message) -> MessageSummary {
    MessageSummary {
        uuid: message_uuid(msg),
        subject: field(msg, "Subject").to_string(),
        date_utc: normalize_date(field(msg, "Date")),
        from_name: contact_name(field(msg, "From")),
        from_email: contact_emails(field(msg, "From")),
        to_email: contact_emails(field(msg, "To")),
        mime_type: mime_type(field(msg, "Content-Type")),
        snippet: snippet(&msg.parts),
    }
}

fn field<'a>(msg: &'a Message, name: &str) -> &'a str {
    msg.header(name).unwrap_or_default()
}

/// Hex SHA-1 over `Subject`, `Date` and `Message-ID`.
pub fn message_uuid(msg: &Message) -> String {
    let mut hasher = Sha1::new();
    for name in ["Subject", "Date", "Message-ID"] {
        hasher.update(field(msg, name).as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// RFC 2822 date to an RFC 3339 UTC timestamp, e.g. `2013-03-04T09:00:00Z`.
pub fn normalize_date(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    let epoch = mailparse::dateparse(date).ok()?;
    DateTime::from_timestamp(epoch, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Display name of a contact field such as `"Alice B." <alice@example.com>`.
pub fn contact_name(value: &str) -> String {
    let value = value.replace('\n', "");
    let name = match value.find('<') {
        Some(idx) => &value[..idx],
        None => value.as_str(),
    };
    let name: String = name.trim().chars().filter(|c| *c != '"' && *c != '\'').collect();
    if name.contains("=?") {
        decode_mime_words(&name)
    } else {
        decode_quoted_printable(&name)
    }
}

/// Every address in a contact field, joined by `", "`.
pub fn contact_emails(value: &str) -> String {
    let value = value.replace('\n', "");
    EMAIL
        .find_iter(&value)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `text/plain; charset=utf-8` -> `text/plain`
pub fn mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn snippet(parts: &[Part]) -> String {
    let plain = parts.iter().find(|p| {
        p.header("Content-Type")
            .is_some_and(|ct| mime_type(ct).eq_ignore_ascii_case("text/plain"))
    });
    plain
        .or_else(|| parts.first())
        .map(|p| snippet_text(&p.body))
        .unwrap_or_default()
}

/// Non-blank lines joined by single spaces, at most `SNIPPET_CHARS` characters.
fn snippet_text(body: &str) -> String {
    let joined = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(SNIPPET_CHARS).collect()
}
