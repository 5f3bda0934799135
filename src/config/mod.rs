//! Sitemap generation configuration (`config.json`).
//!
//! The config maps each content group ("part") to a URL derivation rule:
//!
//! ```json
//! {
//!   "root": "https://example.com",
//!   "parts": [
//!     { "part": "blog", "loc": "slug", "lastmod": "date",
//!       "changefreq": "weekly", "priority": 0.5, "partAsSolo": false }
//!   ]
//! }
//! ```
//!
//! Field names are case-insensitive on read. A config that fails
//! validation aborts generation before any entry is produced.

mod error;
mod validate;

pub use error::ConfigError;
pub use validate::{CHANGEFREQ_TOKENS, FIELD_KEYWORDS};

use crate::utils::json::lowercase_keys;
use serde::Deserialize;
use std::{fs, path::Path};

/// Root configuration: URL prefix plus ordered per-part rules.
///
/// Rule order determines sitemap output order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// URL prefix for every generated `loc` (trailing slashes stripped)
    pub root: String,

    /// Per-part derivation rules, in output order
    pub parts: Vec<ConfigRule>,
}

/// One URL derivation rule, keyed by `part`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    /// Content group this rule applies to (unique across rules)
    pub part: String,

    /// Record field supplying the path fragment: `slug`, `part`, or `date`
    pub loc: String,

    /// Lastmod source: a field keyword, `date` (= record date), or a
    /// literal date string
    pub lastmod: String,

    /// Change frequency hint (`always` .. `never`)
    pub changefreq: String,

    /// Priority in `[0.0, 1.0]`
    pub priority: f64,

    /// Additionally emit one entry for the bare part path, whether or
    /// not any record matches
    #[serde(rename = "partassolo")]
    pub solo: bool,
}

impl SitemapConfig {
    /// Parse and validate configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let mut config: Self = serde_json::from_value(lowercase_keys(value))?;

        config.root = config.root.trim_end_matches('/').to_string();

        if config.parts.is_empty() {
            return Err(ConfigError::Empty);
        }
        validate::validate(&config)?;

        Ok(config)
    }

    /// Load and validate configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_json(&text)
    }
}
