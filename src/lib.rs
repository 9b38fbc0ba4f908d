//! timesquish library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli, config_path),
        Commands::In { .. } => commands::clock::handle_in(&cli.command, cfg),
        Commands::Out { .. } => commands::clock::handle_out(&cli.command, cfg),
        Commands::Status { .. } => commands::clock::handle_status(&cli.command, cfg),
        Commands::Add { .. } => commands::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => commands::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => commands::del::handle(&cli.command, cfg),
        Commands::Submit { .. } => commands::submit::handle(&cli.command, cfg),
        Commands::Squish { .. } => commands::squish::handle_squish(&cli.command, cfg),
        Commands::Unsquish { .. } => commands::squish::handle_unsquish(&cli.command, cfg),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg),
        Commands::Summary { .. } => commands::summary::handle(&cli.command, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg, config_path),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config_path: PathBuf = match &cli.config {
        Some(p) => expand_tilde(p),
        None => Config::config_file(),
    };

    // Load the config once; --db only overrides it for this invocation.
    // `config` reads it unchecked so a bad value can still be printed and fixed.
    let mut cfg = if matches!(cli.command, Commands::Config { .. }) {
        Config::read_from(&config_path)?
    } else {
        Config::load_from(&config_path)?
    };
    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde(custom_db).to_string_lossy().to_string();
    }

    dispatch(&cli, &cfg, &config_path)
}
