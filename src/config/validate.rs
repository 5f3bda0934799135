//! Strict structural validation of part rules.
//!
//! Runs in index order and aborts on the first violation, so a bad
//! configuration never produces a partially-generated sitemap.

use super::{ConfigError, ConfigRule, SitemapConfig};
use crate::utils::date::is_date_token;
use std::collections::HashSet;

/// Record fields a rule may reference for `loc` and `lastmod`
pub const FIELD_KEYWORDS: [&str; 3] = ["slug", "part", "date"];

/// Allowed `changefreq` values per the sitemap protocol
pub const CHANGEFREQ_TOKENS: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Validate every rule, first violation wins.
///
/// Per-rule check order: required fields -> part uniqueness
/// (case-insensitive) -> loc keyword -> lastmod keyword-or-date ->
/// changefreq token -> priority range.
pub fn validate(config: &SitemapConfig) -> Result<(), ConfigError> {
    if config.parts.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut seen_parts = HashSet::new();

    for (index, rule) in config.parts.iter().enumerate() {
        validate_rule(index, rule, &mut seen_parts)?;
    }

    Ok(())
}

fn validate_rule(
    index: usize,
    rule: &ConfigRule,
    seen_parts: &mut HashSet<String>,
) -> Result<(), ConfigError> {
    require(index, "part", &rule.part)?;
    require(index, "loc", &rule.loc)?;
    require(index, "lastmod", &rule.lastmod)?;
    require(index, "changefreq", &rule.changefreq)?;
    if !rule.priority.is_finite() {
        return Err(ConfigError::violation(
            index,
            "priority",
            "must be a finite number",
        ));
    }

    if !seen_parts.insert(rule.part.to_lowercase()) {
        return Err(ConfigError::violation(
            index,
            "part",
            format!("duplicate part `{}`", rule.part),
        ));
    }

    if !is_field_keyword(&rule.loc) {
        return Err(ConfigError::violation(
            index,
            "loc",
            format!(
                "unrecognized value `{}`, allowed: {}",
                rule.loc,
                FIELD_KEYWORDS.join(", ")
            ),
        ));
    }

    if !is_field_keyword(&rule.lastmod) && !is_date_token(&rule.lastmod) {
        return Err(ConfigError::violation(
            index,
            "lastmod",
            format!(
                "unrecognized value `{}`, allowed: {}, or a date",
                rule.lastmod,
                FIELD_KEYWORDS.join(", ")
            ),
        ));
    }

    if !CHANGEFREQ_TOKENS.contains(&rule.changefreq.to_lowercase().as_str()) {
        return Err(ConfigError::violation(
            index,
            "changefreq",
            format!(
                "unrecognized value `{}`, allowed: {}",
                rule.changefreq,
                CHANGEFREQ_TOKENS.join(", ")
            ),
        ));
    }

    if !(0.0..=1.0).contains(&rule.priority) {
        return Err(ConfigError::violation(
            index,
            "priority",
            format!("{} is outside 0.0..=1.0", rule.priority),
        ));
    }

    Ok(())
}

fn require(index: usize, field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::violation(index, field, "is required"));
    }
    Ok(())
}

fn is_field_keyword(value: &str) -> bool {
    FIELD_KEYWORDS.contains(&value.to_lowercase().as_str())
}
