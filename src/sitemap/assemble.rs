//! URL assembly engine.
//!
//! Walks the config rules in order and synthesizes sitemap entries from
//! matching page records. Solo rules additionally emit one entry for the
//! bare part path, independent of record presence.
//!
//! The engine performs no I/O; diagnostics (the consumed-record count)
//! are returned to the caller instead of being logged here.

use super::SitemapEntry;
use crate::config::{ConfigRule, SitemapConfig};
use crate::records::PageRecord;
use crate::utils::date::{format_date, today_utc};
use crate::utils::url::join_url;

/// Assembly output: entries in rule order plus the record-consumption
/// counters for the caller's count-mismatch diagnostic.
#[derive(Debug)]
pub struct Assembly {
    pub entries: Vec<SitemapEntry>,
    /// Records matched by some rule (including ones skipped for a blank
    /// fragment)
    pub consumed: usize,
    /// Total input records
    pub total: usize,
}

impl Assembly {
    /// True when some records matched no rule (expected for unconfigured
    /// groups, surfaced for operator visibility)
    pub fn has_unmatched(&self) -> bool {
        self.consumed != self.total
    }
}

/// Derive sitemap entries from records according to the validated config.
///
/// Deterministic: identical inputs yield identical entries in identical
/// order. Records are matched by exact, case-sensitive `part` equality in
/// input order.
pub fn assemble(config: &SitemapConfig, records: &[PageRecord]) -> Assembly {
    let mut entries = Vec::with_capacity(records.len());
    let mut consumed = 0;

    for rule in &config.parts {
        if rule.solo {
            entries.push(solo_entry(&config.root, rule));
        }

        for record in records.iter().filter(|r| r.part == rule.part) {
            consumed += 1;
            if let Some(entry) = record_entry(&config.root, rule, record) {
                entries.push(entry);
            }
        }
    }

    Assembly {
        entries,
        consumed,
        total: records.len(),
    }
}

/// Synthesize the single entry for a solo rule: the bare part path.
fn solo_entry(root: &str, rule: &ConfigRule) -> SitemapEntry {
    let lastmod = if rule.lastmod.eq_ignore_ascii_case("date") {
        today_utc().to_ymd()
    } else {
        format_date(&rule.lastmod)
    };

    SitemapEntry {
        loc: join_url(root, &[&rule.part]),
        lastmod,
        changefreq: rule.changefreq.clone(),
        priority: rule.priority,
    }
}

/// Derive an entry from one matching record, or `None` when the resolved
/// path fragment is blank (skip, not an error).
fn record_entry(root: &str, rule: &ConfigRule, record: &PageRecord) -> Option<SitemapEntry> {
    let fragment = field_lookup(record, &rule.loc);
    if fragment.trim().is_empty() {
        return None;
    }

    let lastmod = if rule.lastmod.is_empty() || rule.lastmod.eq_ignore_ascii_case("date") {
        &record.date
    } else {
        &rule.lastmod
    };

    Some(SitemapEntry {
        loc: join_url(root, &[&record.part, fragment]),
        lastmod: format_date(lastmod),
        changefreq: rule.changefreq.clone(),
        priority: rule.priority,
    })
}

/// Resolve a record field by keyword; unknown keywords yield empty.
fn field_lookup<'a>(record: &'a PageRecord, key: &str) -> &'a str {
    match key.to_lowercase().as_str() {
        "slug" => &record.slug,
        "part" => &record.part,
        "date" => &record.date,
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(part: &str, loc: &str, lastmod: &str, solo: bool) -> ConfigRule {
        ConfigRule {
            part: part.to_string(),
            loc: loc.to_string(),
            lastmod: lastmod.to_string(),
            changefreq: "weekly".to_string(),
            priority: 0.5,
            solo,
        }
    }

    fn record(part: &str, slug: &str, date: &str) -> PageRecord {
        PageRecord {
            part: part.to_string(),
            slug: slug.to_string(),
            date: date.to_string(),
        }
    }

    fn config(root: &str, parts: Vec<ConfigRule>) -> SitemapConfig {
        SitemapConfig {
            root: root.to_string(),
            parts,
        }
    }

    #[test]
    fn test_assemble_basic_entry() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let records = [record("blog", "hello-world", "05.01.2024")];

        let assembly = assemble(&config, &records);

        assert_eq!(assembly.entries.len(), 1);
        let entry = &assembly.entries[0];
        assert_eq!(entry.loc, "https://ex.com/blog/hello-world");
        assert_eq!(entry.lastmod, "2024-01-05");
        assert_eq!(entry.changefreq, "weekly");
        assert_eq!(entry.priority, 0.5);
        assert_eq!(assembly.consumed, 1);
        assert!(!assembly.has_unmatched());
    }

    #[test]
    fn test_assemble_deterministic() {
        let config = config(
            "https://ex.com",
            vec![
                rule("news", "slug", "date", true),
                rule("blog", "slug", "date", false),
            ],
        );
        let records = [
            record("blog", "a", "2024-01-01"),
            record("news", "b", "2024-01-02"),
            record("blog", "c", "2024-01-03"),
        ];

        let first = assemble(&config, &records);
        let second = assemble(&config, &records);
        assert_eq!(first.entries, second.entries);

        // Rule order dictates output order: news solo, news records, blog records
        let locs: Vec<_> = first.entries.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            [
                "https://ex.com/news",
                "https://ex.com/news/b",
                "https://ex.com/blog/a",
                "https://ex.com/blog/c",
            ]
        );
    }

    #[test]
    fn test_solo_rule_without_records() {
        let config = config("https://ex.com", vec![rule("about", "slug", "date", true)]);

        let assembly = assemble(&config, &[]);

        assert_eq!(assembly.entries.len(), 1);
        let entry = &assembly.entries[0];
        assert_eq!(entry.loc, "https://ex.com/about");
        assert_eq!(entry.lastmod, today_utc().to_ymd());
    }

    #[test]
    fn test_solo_rule_literal_lastmod() {
        let config = config(
            "https://ex.com",
            vec![rule("about", "slug", "15.06.2024", true)],
        );

        let assembly = assemble(&config, &[]);
        assert_eq!(assembly.entries[0].lastmod, "2024-06-15");
    }

    #[test]
    fn test_solo_rule_also_emits_record_entries() {
        let config = config("https://ex.com", vec![rule("docs", "slug", "date", true)]);
        let records = [record("docs", "intro", "2024-02-01")];

        let assembly = assemble(&config, &records);

        assert_eq!(assembly.entries.len(), 2);
        assert_eq!(assembly.entries[0].loc, "https://ex.com/docs");
        assert_eq!(assembly.entries[1].loc, "https://ex.com/docs/intro");
    }

    #[test]
    fn test_non_solo_rule_without_records_emits_nothing() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let assembly = assemble(&config, &[]);
        assert!(assembly.entries.is_empty());
    }

    #[test]
    fn test_blank_fragment_skipped() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let records = [
            record("blog", "", "2024-01-01"),
            record("blog", "  ", "2024-01-01"),
            record("blog", "ok", "2024-01-01"),
        ];

        let assembly = assemble(&config, &records);

        assert_eq!(assembly.entries.len(), 1);
        assert_eq!(assembly.entries[0].loc, "https://ex.com/blog/ok");
        // Skipped records still count as consumed
        assert_eq!(assembly.consumed, 3);
        assert!(!assembly.has_unmatched());
    }

    #[test]
    fn test_part_match_is_case_sensitive() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let records = [record("Blog", "a", "2024-01-01")];

        let assembly = assemble(&config, &records);

        assert!(assembly.entries.is_empty());
        assert_eq!(assembly.consumed, 0);
        assert!(assembly.has_unmatched());
    }

    #[test]
    fn test_loc_field_part_and_date() {
        let config = config(
            "https://ex.com",
            vec![
                rule("archive", "date", "2024-01-01", false),
                rule("sections", "part", "date", false),
            ],
        );
        let records = [
            record("archive", "", "2024-03-01"),
            record("sections", "ignored", "2024-03-02"),
        ];

        let assembly = assemble(&config, &records);

        assert_eq!(assembly.entries[0].loc, "https://ex.com/archive/2024-03-01");
        assert_eq!(assembly.entries[0].lastmod, "2024-01-01");
        assert_eq!(
            assembly.entries[1].loc,
            "https://ex.com/sections/sections"
        );
    }

    #[test]
    fn test_literal_lastmod_overrides_record_date() {
        let config = config(
            "https://ex.com",
            vec![rule("blog", "slug", "31.12.2023", false)],
        );
        let records = [record("blog", "a", "2024-01-01")];

        let assembly = assemble(&config, &records);
        assert_eq!(assembly.entries[0].lastmod, "2023-12-31");
    }

    #[test]
    fn test_unparseable_record_date_passes_through() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let records = [record("blog", "a", "sometime")];

        let assembly = assemble(&config, &records);
        assert_eq!(assembly.entries[0].lastmod, "sometime");
    }

    #[test]
    fn test_unmatched_records_counted() {
        let config = config("https://ex.com", vec![rule("blog", "slug", "date", false)]);
        let records = [
            record("blog", "a", "2024-01-01"),
            record("orphan", "b", "2024-01-01"),
        ];

        let assembly = assemble(&config, &records);

        assert_eq!(assembly.consumed, 1);
        assert_eq!(assembly.total, 2);
        assert!(assembly.has_unmatched());
    }

    #[test]
    fn test_doubled_slashes_collapsed() {
        let config = config("https://ex.com/", vec![rule("blog", "slug", "date", false)]);
        let records = [record("blog", "/hello/", "2024-01-01")];

        let assembly = assemble(&config, &records);
        assert_eq!(assembly.entries[0].loc, "https://ex.com/blog/hello");
    }
}
