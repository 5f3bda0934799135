//! Sitemap generation command.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::SitemapConfig;
use crate::records::{PageRecord, read_records};
use crate::sitemap::{assemble, serialize_entries};
use crate::utils::plural_count;
use crate::{debug, log};

use super::{Cli, GenerateArgs};

/// Generate a sitemap from the config and all record files in the
/// working directory.
pub fn generate_sitemap(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let config_path = cli.dir.join(&cli.config);
    let config = SitemapConfig::load(&config_path)
        .with_context(|| format!("invalid config `{}`", config_path.display()))?;
    debug!("generate"; "loaded {} from {}",
        plural_count(config.parts.len(), "rule"), config_path.display());

    // The root is any prefix string; a non-URL root is worth flagging but
    // never stops generation
    if !config.root.is_empty() && url::Url::parse(&config.root).is_err() {
        log!("warning"; "root `{}` is not an absolute URL", config.root);
    }

    let records = collect_records(&cli.dir, &config_path, &args.skip)?;
    if records.is_empty() {
        log!("generate"; "no page records found, nothing to generate");
        return Ok(());
    }

    let assembly = assemble(&config, &records);
    if assembly.has_unmatched() {
        log!("warning"; "only {} of {} matched a rule",
            assembly.consumed, plural_count(assembly.total, "record"));
    }

    let output_path = cli.dir.join(&args.output);
    fs::write(&output_path, serialize_entries(&assembly.entries))
        .with_context(|| format!("failed to write `{}`", output_path.display()))?;

    log!("generate"; "wrote {} entr{} to {}",
        assembly.entries.len(),
        if assembly.entries.len() == 1 { "y" } else { "ies" },
        output_path.display());
    Ok(())
}

/// Read records from every `*.json` file in the working directory,
/// excluding the config file and skip-masked names.
///
/// A file that fails to parse is logged and skipped; it never aborts the
/// run. Files are visited in name order so output is deterministic.
fn collect_records(dir: &Path, config_path: &Path, skip: &[String]) -> Result<Vec<PageRecord>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory `{}`", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension() == Some(OsStr::new("json")))
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in paths {
        if is_excluded(&path, config_path, skip) {
            debug!("generate"; "skipping {}", path.display());
            continue;
        }

        match read_records(&path) {
            Ok(found) => {
                debug!("generate"; "{}: {}", path.display(), plural_count(found.len(), "record"));
                records.extend(found);
            }
            Err(err) => {
                log!("warning"; "skipping {}: {:#}", path.display(), anyhow::Error::from(err));
            }
        }
    }

    debug!("generate"; "collected {}", plural_count(records.len(), "record"));
    Ok(records)
}

fn is_excluded(path: &Path, config_path: &Path, skip: &[String]) -> bool {
    if path.file_name() == config_path.file_name() {
        return true;
    }
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    skip.iter().any(|mask| name.contains(mask.as_str()))
}
