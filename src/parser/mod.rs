//! Decomposition of a raw Apple Mail message into headers and body parts.
//!
//! The pipeline is line-oriented and heuristic: headers are located by
//! pattern, values are sliced by position, and parts are cut at lines that
//! contain a known boundary token. Nothing here fails; malformed input yields
//! empty or partial structures.

pub mod boundary;
pub mod content;
pub mod headers;
pub mod normalize;
pub mod parts;

use log::debug;

use crate::domain::message::{HeaderMap, Message, Part};
use boundary::{header_boundary, resolve_boundaries};
use content::transform_body;
use headers::{HeaderScope, parse_header_block};
use normalize::{normalize_line_endings, split_header_body, strip_footer};
use parts::{decode_segment, split_parts};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Decompose multipart parts recursively into `Part::parts`, using only
    /// each level's `Content-Type` boundary. Off by default: one level is
    /// decoded and boundaries declared anywhere in the body are honoured.
    pub nested_multipart: bool,
}

/// Parse a raw message with default options.
pub fn parse(raw: &str) -> Message {
    parse_with(raw, &ParseOptions::default())
}

pub fn parse_with(raw: &str, opts: &ParseOptions) -> Message {
    let text = normalize_line_endings(raw);
    let (block, rest) = split_header_body(&text);
    let body = strip_footer(rest);

    let headers = parse_header_block(block, HeaderScope::Message);
    let parts = decompose(&headers, body, opts);
    debug!(
        "parsed message: {} header fields, {} parts",
        headers.len(),
        parts.len()
    );
    Message { headers, parts }
}

fn decompose(headers: &HeaderMap, body: &str, opts: &ParseOptions) -> Vec<Part> {
    let boundaries = if opts.nested_multipart {
        header_boundary(headers).into_iter().collect()
    } else {
        resolve_boundaries(headers, body)
    };

    if boundaries.is_empty() {
        // The sole part has no headers of its own, so its body is kept verbatim.
        return vec![Part::new(HeaderMap::new(), body.trim().to_string())];
    }

    split_parts(body, &boundaries)
        .iter()
        .map(|segment| {
            let mut part = decode_segment(segment);
            if opts.nested_multipart && header_boundary(&part.headers).is_some() {
                part.parts = decompose(&part.headers, &part.body, opts);
                part.body.clear();
            } else {
                part.body = transform_body(&part.headers, &part.body);
            }
            part
        })
        .filter(|part| !part.is_empty())
        .collect()
}
