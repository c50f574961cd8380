//! Command-line interface entry point for `metromap`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use metromap::config::Config;
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // An explicit --config file must parse; a missing one means defaults
    let (config_path, mut config) = match args.config.as_ref() {
        Some(path) if path.exists() => match Config::load_from(path) {
            Ok(config) => (path.clone(), config),
            Err(e) => {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        },
        Some(path) => (path.clone(), Config::from_defaults()),
        None => (Config::get_config_file_path(), Config::load()),
    };
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        match init_file_logging(log_path) {
            Ok(()) if verbose => eprintln!("✓ File logging initialized at: {display_path}"),
            Ok(()) => info!("File logging initialized at: {display_path}"),
            Err(e) => eprintln!("✗ Failed to initialize file logging at: {display_path}: {e}"),
        }
    }

    match args.command {
        None => commands::render::run(&[], false, None, &config),
        Some(Command::Render {
            outputs,
            no_display,
            dpi,
        }) => commands::render::run(&outputs, no_display, dpi, &config),
        Some(Command::Config { subcommand }) => {
            commands::config::run(subcommand, &mut config, &defaults, &config_path);
        }
    }
}
