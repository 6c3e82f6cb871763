//! Polyglot - serve and publish a template tree in every configured language,
//! with translated URL segments.

mod cli;
mod config;
mod core;
mod i18n;
mod logger;
mod page;
mod render;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve_site(&config),
        Commands::Build { .. } => cli::build::publish_site(&config),
        Commands::Routes { args } => cli::routes::list_routes(&config, args),
    }
}
