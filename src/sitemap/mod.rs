//! Sitemap assembly and XML serialization.
//!
//! `assemble` joins page records to config rules and derives entries;
//! `xml` renders them to `sitemap.xml` and reads an existing sitemap back
//! for link checking.

pub mod assemble;
pub mod xml;

pub use assemble::{Assembly, assemble};
pub use xml::{load_entries, serialize_entries};

/// One `<url>` entry. Created by the assembly engine, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute URL
    pub loc: String,
    /// Last modification date, `YYYY-MM-DD` on output
    pub lastmod: String,
    /// Change frequency hint
    pub changefreq: String,
    /// Priority in `[0.0, 1.0]`
    pub priority: f64,
}
