//! Check report types and formatting.

use std::fmt;

use owo_colors::{OwoColorize, Stream, Style};

use crate::checker::LinkCheckResult;
use crate::utils::plural_s;

/// Aggregated outcome of one check run, sorted by URL.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub results: Vec<LinkCheckResult>,
}

impl CheckReport {
    pub fn new(mut results: Vec<LinkCheckResult>) -> Self {
        results.sort_by(|a, b| a.url.cmp(&b.url));
        Self { results }
    }

    pub fn healthy_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn redirect_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_redirect).count()
    }

    pub fn broken_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_broken).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    /// Problems that fail the run: broken URLs plus probe failures.
    pub fn problem_count(&self) -> usize {
        self.broken_count() + self.failed_count()
    }

    /// Print per-URL lines to stderr. Healthy URLs only when `verbose`.
    pub fn print(&self, verbose: bool) {
        for result in &self.results {
            if result.is_ok() && !verbose {
                continue;
            }
            eprintln!("{}", self.format_line(result));
        }
    }

    fn format_line(&self, result: &LinkCheckResult) -> String {
        let red_bold = Style::new().red().bold();
        let yellow_bold = Style::new().yellow().bold();
        let elapsed = format!("({} ms)", result.elapsed_ms)
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string();

        match (&result.error, result.status) {
            (Some(error), _) => format!(
                "{} {} {} {}",
                "✗".if_supports_color(Stream::Stdout, |t| t.style(red_bold)),
                result.url,
                error.if_supports_color(Stream::Stdout, |t| t.red()),
                elapsed
            ),
            (None, Some(status)) if result.is_broken => format!(
                "{} {} {} {}",
                "✗".if_supports_color(Stream::Stdout, |t| t.style(red_bold)),
                result.url,
                status
                    .to_string()
                    .if_supports_color(Stream::Stdout, |t| t.style(red_bold)),
                elapsed
            ),
            (None, Some(status)) if result.is_redirect => {
                let target = result.redirect_location.as_deref().unwrap_or("?");
                format!(
                    "{} {} {} {} {} {}",
                    "↪".if_supports_color(Stream::Stdout, |t| t.style(yellow_bold)),
                    result.url,
                    status
                        .to_string()
                        .if_supports_color(Stream::Stdout, |t| t.yellow()),
                    "→".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                    target,
                    elapsed
                )
            }
            (None, Some(status)) => format!(
                "{} {} {} {}",
                "✓".if_supports_color(Stream::Stdout, |t| t.green()),
                result.url,
                status
                    .to_string()
                    .if_supports_color(Stream::Stdout, |t| t.green()),
                elapsed
            ),
            // Unreachable by construction: no error implies a status
            (None, None) => format!(
                "{} {}",
                "?".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                result.url
            ),
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problems = self.problem_count();
        if problems == 0 {
            write!(
                f,
                "{}",
                "all links healthy".if_supports_color(Stream::Stdout, |t| t.green())
            )
        } else {
            write!(
                f,
                "{} {} {}",
                "found".if_supports_color(Stream::Stdout, |t| t.dimmed()),
                problems
                    .to_string()
                    .if_supports_color(Stream::Stdout, |t| t.style(Style::new().red().bold())),
                format!("problem{}", plural_s(problems))
                    .if_supports_color(Stream::Stdout, |t| t.dimmed())
            )
        }
    }
}
