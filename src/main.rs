//! Sitemapper - sitemap generation and link checking for static sites.

#![allow(dead_code)]

mod checker;
mod cli;
mod config;
mod logger;
mod records;
mod sitemap;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Generate { args } => {
            logger::set_verbose(args.verbose);
            cli::generate::generate_sitemap(&cli, args)
        }
        Commands::Check { args } => cli::check::check_sitemap(&cli, args),
    }
}
