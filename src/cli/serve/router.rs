//! Request dispatch.
//!
//! Maps method + URL to a [`Reply`] without touching the socket, so the
//! whole HTTP surface can be exercised in unit tests.

use super::path::request_path;
use crate::config::SiteConfig;
use crate::discovery::{Discovery, discover};
use crate::generator::{RenderContext, SitemapRoute};
use crate::utils::date::DateTimeUtc;
use crate::utils::hash;
use crate::utils::mime::types::{PLAIN, XML};
use crate::{debug, log};
use tiny_http::Method;

/// A response ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    fn text(status: u16, message: impl Into<String>) -> Self {
        Self::new(status)
            .header("Content-Type", PLAIN)
            .body(message.into().into_bytes())
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// First value of a header, case-insensitive.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One incoming request, reduced to what dispatch looks at.
#[derive(Debug, Clone)]
pub struct RequestInfo<'a> {
    pub method: Method,
    pub url: &'a str,
    pub if_none_match: Option<&'a str>,
}

/// Answer a request.
///
/// `started_at` stamps the index entries, so the index stays byte-stable
/// for the lifetime of the server.
pub fn dispatch(request: RequestInfo<'_>, config: &SiteConfig, started_at: DateTimeUtc) -> Reply {
    if !matches!(request.method, Method::Get | Method::Head) {
        return Reply::text(405, "405 Method Not Allowed").header("Allow", "GET, HEAD");
    }

    let path = request_path(request.url);
    let Some(route) = SitemapRoute::from_url_path(&path) else {
        debug!("serve"; "404 {}", path);
        return Reply::text(404, "404 Not Found");
    };

    let discovery = if route.needs_discovery() {
        discover(&config.discovery)
    } else {
        Ok(Discovery::empty(started_at))
    };

    let ctx = RenderContext::new(config, started_at);
    let xml = match route.render(&ctx, discovery.as_ref()) {
        Ok(xml) => xml,
        Err(err) => {
            log!("error"; "{}: {:#}", route, err);
            return Reply::text(500, format!("500 Internal Server Error\n\n{err:#}"));
        }
    };

    let etag = format!("\"{}\"", hash::fingerprint(&xml));
    let cache_control = config.sitemap.cache_control.as_str();

    if request
        .if_none_match
        .is_some_and(|header| etag_matches(header, &etag))
    {
        return Reply::new(304)
            .header("ETag", etag)
            .header("Cache-Control", cache_control);
    }

    debug!("serve"; "200 {} ({} bytes)", route, xml.len());
    Reply::new(200)
        .header("Content-Type", XML)
        .header("Cache-Control", cache_control)
        .header("ETag", etag)
        .body(xml.into_bytes())
}

/// `If-None-Match` check: `*` or any listed tag, weak or strong.
fn etag_matches(header: &str, etag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
