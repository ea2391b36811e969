//! Sitemap document generation.
//!
//! - [`sitemap`]: `<urlset>` documents, plain or hreflang-annotated
//! - [`index`]: the `<sitemapindex>` pointing at child sitemaps
//! - [`route`]: which pages each served sitemap contains
//!
//! Generators take already-discovered pages; they never touch the route
//! source themselves.

pub mod index;
pub mod route;
pub mod sitemap;

pub use index::SitemapIndex;
pub use route::{RenderContext, SitemapRoute};

use crate::utils::xml::{find_invalid_char, is_xml_char};
use anyhow::{Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::borrow::Cow;

/// Minify XML content if enabled.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        let minified = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified)
    } else {
        Cow::Borrowed(content)
    }
}

/// Escape special XML characters. Characters XML cannot represent at all
/// are dropped.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_xml_char(c))
    {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

/// Parse `xml` to the end and report the first well-formedness error.
///
/// Requires exactly one root element with every start tag closed, and only
/// characters allowed by XML 1.0.
pub fn check_well_formed(xml: &str) -> Result<()> {
    if let Some((pos, c)) = find_invalid_char(xml) {
        bail!("character U+{:04X} not allowed in XML at position {pos}", c as u32);
    }

    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) if depth == 0 => roots += 1,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Text(text)) if depth == 0 => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    bail!(
                        "text outside the root element at position {}",
                        reader.buffer_position()
                    );
                }
            }
            Ok(Event::GeneralRef(reference)) => {
                let name: &[u8] = &reference;
                let known = matches!(name, b"amp" | b"lt" | b"gt" | b"quot" | b"apos");
                if !known && !reference.is_char_ref() {
                    bail!(
                        "undefined entity `&{};` at position {}",
                        String::from_utf8_lossy(name),
                        reader.buffer_position()
                    );
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!(
                "XML parse error at position {}: {:?}",
                reader.error_position(),
                e
            ),
        }
    }

    if depth != 0 {
        bail!("unexpected end of document: {depth} element(s) left open");
    }
    if roots != 1 {
        bail!("expected exactly one root element, found {roots}");
    }
    Ok(())
}
