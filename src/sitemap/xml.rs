//! Sitemap XML serialization and loading.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8" standalone="yes"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
//!   <url>
//!     <loc>https://example.com/blog/hello</loc>
//!     <lastmod>2024-01-05</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.5</priority>
//!   </url>
//! </urlset>
//! ```

use super::SitemapEntry;
use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, Event};
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Render entries as a sitemap XML document, deterministic in entry order.
pub fn serialize_entries(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);

    xml.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"yes\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\" xmlns:xsi=\"");
    xml.push_str(XSI_NS);
    xml.push_str("\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&escape_xml(&entry.lastmod));
        xml.push_str("</lastmod>\n    <changefreq>");
        xml.push_str(&escape_xml(&entry.changefreq));
        xml.push_str("</changefreq>\n    <priority>");
        xml.push_str(&format_priority(entry.priority));
        xml.push_str("</priority>\n  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Parse a sitemap document back into entries.
///
/// Tolerant by design: unknown elements are skipped, missing sub-elements
/// default to empty string / priority 0. Element names are matched by
/// local name so namespace prefixes do not break loading.
///
/// Field text accumulates across events: the reader emits entity and
/// character references (`&amp;`, `&#47;`) as `GeneralRef` events between
/// `Text` chunks, so a field's value is only committed at its end tag.
pub fn load_entries(xml: &str) -> Result<Vec<SitemapEntry>> {
    #[derive(Clone, Copy)]
    enum Field {
        Loc,
        Lastmod,
        Changefreq,
        Priority,
    }

    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut current: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().context("malformed sitemap XML")? {
            Event::Start(e) => {
                field = match e.local_name().as_ref() {
                    b"url" => {
                        current = Some(SitemapEntry {
                            loc: String::new(),
                            lastmod: String::new(),
                            changefreq: String::new(),
                            priority: 0.0,
                        });
                        None
                    }
                    b"loc" if current.is_some() => Some(Field::Loc),
                    b"lastmod" if current.is_some() => Some(Field::Lastmod),
                    b"changefreq" if current.is_some() => Some(Field::Changefreq),
                    b"priority" if current.is_some() => Some(Field::Priority),
                    _ => None,
                };
                text.clear();
            }
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.decode().context("malformed sitemap XML")?);
                }
            }
            Event::GeneralRef(r) => {
                if field.is_some() {
                    text.push(resolve_ref(&r)?);
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"url" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                } else if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let value = text.trim();
                    match f {
                        Field::Loc => entry.loc = value.to_string(),
                        Field::Lastmod => entry.lastmod = value.to_string(),
                        Field::Changefreq => entry.changefreq = value.to_string(),
                        Field::Priority => entry.priority = value.parse().unwrap_or(0.0),
                    }
                }
                field = None;
                text.clear();
            }
            // The reader reports truncation as a plain Eof, not an error
            Event::Eof => {
                if current.is_some() {
                    anyhow::bail!("malformed sitemap XML: unclosed `url` element");
                }
                break;
            }
            _ => {}
        }
    }

    Ok(entries)
}

/// Resolve a built-in entity or numeric character reference.
fn resolve_ref(r: &BytesRef) -> Result<char> {
    if let Some(ch) = r.resolve_char_ref().context("malformed sitemap XML")? {
        return Ok(ch);
    }
    let name = r.decode().context("malformed sitemap XML")?;
    Ok(match name.as_ref() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "apos" => '\'',
        "quot" => '"',
        other => anyhow::bail!("unknown entity `&{other};` in sitemap"),
    })
}

/// Format priority with a culture-invariant decimal point.
fn format_priority(priority: f64) -> String {
    priority.to_string()
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
