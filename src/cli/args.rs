//! Command-line interface definitions.

use crate::config::ConfigFormat;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Load, validate and export style engine configuration
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "tailwind.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a starter config file
    #[command(visible_alias = "i")]
    Init {
        /// Directory to create the config in (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Load and validate the config
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Print the normalized config
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },

    /// Write the engine's `tailwind.config.js`
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Reload and revalidate whenever the config file changes
    #[command(visible_alias = "w")]
    Watch {
        /// Re-export `tailwind.config.js` after every valid reload
        #[arg(short, long)]
        export: bool,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Count the files each content glob matches
    #[arg(short, long)]
    pub scan: bool,

    /// Check that every plugin is installed under `node_modules`
    #[arg(short, long)]
    pub resolve_plugins: bool,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output file (default: `tailwind.config.js` next to the config)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}
