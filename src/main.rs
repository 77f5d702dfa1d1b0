//! vite-bridge - manifest inspection and build-output cleanup CLI.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use vite_bridge::{
    AssetResolutionConfig,
    cli::{Cli, Commands, list, tidy},
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    // The defaults form a complete configuration, so a missing file is fine
    let config = if cli.config.exists() {
        AssetResolutionConfig::load(&cli.config)
            .with_context(|| format!("failed to load {}", cli.config.display()))?
    } else {
        AssetResolutionConfig::default()
    };

    match &cli.command {
        Commands::Tidy { yes, dry_run } => {
            tidy::run(&config, &cli.webroot, *yes, *dry_run).map(|_| ())
        }
        Commands::List => list::run(&config),
    }
}
