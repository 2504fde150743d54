use crate::domain::message::{HeaderMap, find_header};
use crate::mail::decoders::{decode_quoted_printable, flatten_html};

pub fn is_quoted_printable(headers: &HeaderMap) -> bool {
    find_header(headers, "Content-Transfer-Encoding")
        .is_some_and(|cte| cte.trim().eq_ignore_ascii_case("quoted-printable"))
}

pub fn is_html(headers: &HeaderMap) -> bool {
    find_header(headers, "Content-Type")
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("text/html"))
}

/// Decode the transfer encoding, then flatten HTML bodies.
pub fn transform_body(headers: &HeaderMap, body: &str) -> String {
    let mut text = if is_quoted_printable(headers) {
        decode_quoted_printable(body)
    } else {
        body.to_string()
    };
    if is_html(headers) {
        text = flatten_html(&text);
    }
    text
}
