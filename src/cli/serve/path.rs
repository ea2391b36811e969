//! Request URL to route path.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Decode a request URL into the path it addresses: query string and
/// fragment dropped, a single leading `/` kept.
pub fn request_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(Cow::into_owned)
        .unwrap_or_default();

    format!("/{}", decoded.trim_start_matches('/'))
}
