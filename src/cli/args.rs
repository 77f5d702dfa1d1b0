//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Vite manifest integration CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path
    #[arg(short = 'C', long, default_value = "vite-bridge.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Web root directory holding the published assets
    #[arg(short, long, default_value = "webroot", value_hint = clap::ValueHint::DirPath)]
    pub webroot: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Delete build artifacts no longer referenced by the manifest
    #[command(visible_alias = "t")]
    Tidy {
        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,

        /// Only report orphaned files, never delete
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List manifest records with their classification and resolved URLs
    #[command(visible_alias = "l")]
    List,
}
