//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod export;
pub mod init;
pub mod show;
pub mod watch;

pub use args::{CheckArgs, Cli, Commands, ExportArgs};
