//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Sitemapper CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Working directory containing config and record files
    #[arg(short, long, global = true, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Config file path (relative to working directory)
    #[arg(short = 'C', long, global = true, default_value = "config.json", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate sitemap.xml from config and page record files
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Check every sitemap URL over HTTP for broken links and redirects
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Output file path (relative to working directory)
    #[arg(short, long, default_value = "sitemap.xml", value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Skip record files whose name contains any of these masks
    /// (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Sitemap file to check (relative to working directory)
    #[arg(default_value = "sitemap.xml", value_hint = clap::ValueHint::FilePath)]
    pub sitemap: PathBuf,

    /// Maximum number of URLs probed at once
    #[arg(short = 'j', long, default_value_t = crate::checker::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = crate::checker::DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Report healthy URLs too, not only problems
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
