mod commands;
mod input;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daygrid_core::config::DayGridConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daygrid")]
#[command(about = "Browse months and book time slots in a terminal calendar")]
struct Cli {
    /// Use this config file instead of ~/.config/daygrid/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive calendar session (default)
    Session,
    /// Print a month grid
    Grid {
        /// Year to show (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to show, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Show config file location and effective settings
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => commands::session::run(&config),
        Commands::Grid { year, month } => commands::grid::run(year, month),
        Commands::Config { save } => commands::config::run(cli.config.as_deref(), &config, save),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<DayGridConfig> {
    match path {
        Some(path) => DayGridConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => DayGridConfig::load().context("Failed to load config"),
    }
}
