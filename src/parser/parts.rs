use log::{debug, trace};

use crate::domain::message::Part;
use crate::parser::headers::{HeaderScope, parse_header_block};
use crate::parser::normalize::split_header_body;

/// Cut a body into raw segments at boundary lines.
///
/// Boundary lines are dropped. Segment 0 holds whatever precedes the first
/// boundary. A line equal to the previous line of its segment is skipped; some
/// encoders emit every line twice.
pub fn split_parts(body: &str, boundaries: &[String]) -> Vec<String> {
    if boundaries.is_empty() {
        return vec![body.trim().to_string()];
    }

    let mut segments: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.split('\n') {
        if boundaries.iter().any(|b| line.contains(b.as_str())) {
            trace!("boundary line {line:?} opens segment {}", segments.len() + 1);
            segments.push(std::mem::take(&mut current));
            continue;
        }
        if current.last() == Some(&line) {
            trace!("skipping repeated line {line:?}");
            continue;
        }
        current.push(strip_boundary_remnant(line, boundaries));
    }
    segments.push(current);

    debug!("split body into {} segments", segments.len());
    segments.into_iter().map(|lines| lines.join("\n")).collect()
}

/// Blank out a line that starts with a dash run and a boundary token.
///
/// Inside `split_parts` every such line already counts as a boundary line, so
/// this never changes a stored line there.
pub fn strip_boundary_remnant<'a>(line: &'a str, boundaries: &[String]) -> &'a str {
    let rest = line.trim_start_matches('-');
    if boundaries
        .iter()
        .any(|b| !b.is_empty() && rest.starts_with(b.as_str()))
    {
        ""
    } else {
        line
    }
}

/// Split a raw segment into its `Content-*` headers and raw body.
///
/// Only the first blank line separates the two, later blank lines stay in the body.
pub fn decode_segment(segment: &str) -> Part {
    let (block, body) = split_header_body(segment);
    let headers = parse_header_block(block, HeaderScope::Part);
    Part::new(headers, body.to_string())
}
