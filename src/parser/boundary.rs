use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::domain::message::{HeaderMap, find_header};

static HEADER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)boundary=(?:"([^"]*)"|([^;\s]+))"#).unwrap());

static BODY_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|\s)boundary=(.*)$").unwrap());

/// The `boundary=` parameter of the governing `Content-Type` field, unquoted.
pub fn header_boundary(headers: &HeaderMap) -> Option<String> {
    let content_type = find_header(headers, "Content-Type")?;
    let caps = HEADER_BOUNDARY.captures(content_type)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim().to_string())
        .filter(|b| !b.is_empty())
}

/// Boundaries declared by `boundary=` lines anywhere in the body.
pub fn body_boundaries(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| BODY_BOUNDARY.captures(line))
        .filter_map(|caps| clean_body_boundary(&caps[1]))
        .collect()
}

/// Header boundary first, then body declarations, without duplicates.
pub fn resolve_boundaries(headers: &HeaderMap, body: &str) -> Vec<String> {
    let mut boundaries: Vec<String> = Vec::new();
    for boundary in header_boundary(headers).into_iter().chain(body_boundaries(body)) {
        if !boundaries.contains(&boundary) {
            boundaries.push(boundary);
        }
    }
    debug!("resolved boundaries: {boundaries:?}");
    boundaries
}

fn clean_body_boundary(raw: &str) -> Option<String> {
    let mut value = raw.trim();
    if let Some(idx) = value.find('<') {
        value = &value[..idx];
    }
    // `=` mangled into `=3D` by quoted-printable encoding.
    if let Some(rest) = value.strip_prefix("3D")
        && (rest.starts_with('"') || rest.starts_with("Apple"))
    {
        value = rest;
    }
    let value = match value.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or_default(),
        None => value
            .split(|c: char| c == ';' || c.is_whitespace())
            .next()
            .unwrap_or_default(),
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
