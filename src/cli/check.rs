//! Sitemap link checking command.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::checker::{self, CheckOptions, cancel_channel};
use crate::log;
use crate::sitemap::load_entries;
use crate::utils::plural_count;

use super::report::CheckReport;
use super::{CheckArgs, Cli};

/// Probe every URL of an existing sitemap and report broken links.
pub fn check_sitemap(cli: &Cli, args: &CheckArgs) -> Result<()> {
    let sitemap_path = cli.dir.join(&args.sitemap);
    let xml = fs::read_to_string(&sitemap_path)
        .with_context(|| format!("failed to read `{}`", sitemap_path.display()))?;
    let entries = load_entries(&xml)
        .with_context(|| format!("failed to parse `{}`", sitemap_path.display()))?;

    let urls: Vec<String> = entries.into_iter().map(|entry| entry.loc).collect();
    if urls.is_empty() {
        log!("check"; "no URLs in {}", sitemap_path.display());
        return Ok(());
    }

    let options = CheckOptions {
        concurrency: args.concurrency,
        timeout: Duration::from_secs(args.timeout),
    };
    log!("check"; "checking {} ({} at a time, {}s timeout)",
        plural_count(urls.len(), "URL"), options.concurrency, args.timeout);

    let (cancel_tx, cancel_rx) = cancel_channel();
    ctrlc::set_handler(move || {
        let _ = cancel_tx.send(true);
    })
    .context("failed to set Ctrl+C handler")?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let results = runtime.block_on(checker::check(urls, &options, cancel_rx))?;

    let report = CheckReport::new(results);
    report.print(args.verbose);
    log!("check"; "{report}");

    if report.problem_count() > 0 {
        anyhow::bail!(
            "found {} broken or unreachable",
            plural_count(report.problem_count(), "URL")
        );
    }
    Ok(())
}
