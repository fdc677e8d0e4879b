//! twcfg - load, validate and export utility-first CSS engine configuration.

mod cli;
mod config;
mod export;
mod logger;
mod scan;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ConfigDescriptor;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { dir } => init(&cli, dir.as_deref()),
        Commands::Check { args } => with_config(&cli, |c| cli::check::check_config(c, args)),
        Commands::Show { format } => with_config(&cli, |c| cli::show::show_config(c, *format)),
        Commands::Export { args } => with_config(&cli, |c| cli::export::export_config(c, args)),
        Commands::Watch { export } => with_config(&cli, |_| cli::watch::watch_config(*export)),
    }
}

/// `init` runs before any config exists.
fn init(cli: &Cli, dir: Option<&Path>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let file_name = cli
        .config
        .file_name()
        .map_or_else(|| PathBuf::from("tailwind.toml"), PathBuf::from);
    cli::init::init_config(&dir, &file_name).map(|_| ())
}

/// Load the config into the global handle, then run `f` on it.
fn with_config(cli: &Cli, f: impl FnOnce(&ConfigDescriptor) -> Result<()>) -> Result<()> {
    let config = cli::common::load_config(cli)?;
    f(&config)
}
