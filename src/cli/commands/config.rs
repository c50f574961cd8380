//! Config command handler

use crate::args::ConfigSubcommand;
use metromap::config::Config;
use std::io::{self, Write};
use std::path::Path;

/// Dispatch config subcommands
///
/// `path` is the configuration file that `set`, `unset`, and `reset` act on.
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config, path: &Path) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, path, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, path, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(path),
    }
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<String>) {
    if let Some(k) = key {
        match config.get(&k) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("Unknown config key: '{k}'");
                std::process::exit(1);
            }
        }
    } else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, path: &Path, key: &str, value: &str) {
    if let Err(e) = config.set(key, value) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    save_or_exit(config, path);
    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, path: &Path, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    save_or_exit(config, path);
    println!("✓ Reset {key} to default");
}

/// Handle the config reset subcommand
pub fn handle_config_reset(path: &Path) {
    if !path.exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset_at(path) {
            eprintln!("Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}

fn save_or_exit(config: &Config, path: &Path) {
    if let Err(e) = config.save_to(path) {
        eprintln!("Failed to save config: {e}");
        std::process::exit(1);
    }
}
