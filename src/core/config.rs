//! Configuration module for `metromap`

use crate::core::render::{RenderOptions, DEFAULT_DPI};
use logger::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$METROMAP";

/// Every key accepted by [`Config::get`], [`Config::set`], and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 8] = [
    "level", "file", "verbose", "out_dir", "dpi", "png_name", "pdf_name", "show",
];

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory the default outputs are written to
    #[serde(default)]
    pub out_dir: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// PNG resolution; 0 means unset
    #[serde(default)]
    pub dpi: u32,
    /// File name of the default PNG output
    #[serde(default)]
    pub png_name: String,
    /// File name of the default PDF output
    #[serde(default)]
    pub pdf_name: String,
    /// Open the first output in the system viewer
    #[serde(default)]
    pub show: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override output directory
    pub out_dir: Option<String>,
    /// Override PNG resolution
    pub dpi: Option<u32>,
    /// Override viewer display
    pub show: Option<bool>,
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$METROMAP` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/metromap`
    /// - macOS: `~/Library/Application Support/metromap`
    /// - Windows: `%APPDATA%\metromap`
    #[must_use]
    pub fn get_metromap_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("metromap")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_metromap_dir`](Self::get_metromap_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_metromap_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty (or zero) here and set in `defaults` are
    /// updated, so user settings survive while newly added fields get values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.out_dir, &defaults.paths.out_dir),
            (&mut self.render.png_name, &defaults.render.png_name),
            (&mut self.render.pdf_name, &defaults.render.pdf_name),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }

        if self.render.dpi == 0 && defaults.render.dpi != 0 {
            self.render.dpi = defaults.render.dpi;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the configuration file is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir = Self::expand_variables(out_dir);
        }
        if let Some(dpi) = overrides.dpi {
            self.render.dpi = dpi;
        }
        if let Some(show) = overrides.show {
            self.render.show = show;
        }
    }

    /// Expand `$METROMAP` in a string to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_metromap_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$METROMAP` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// Load the user configuration, falling back to defaults
    ///
    /// Reads the file at [`get_config_file_path`](Self::get_config_file_path)
    /// if it exists and fills missing fields from the defaults. Nothing is
    /// written: a missing file simply means defaults, and an unreadable one
    /// is reported as a warning.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        if !config_file.exists() {
            return Self::from_defaults();
        }
        Self::load_from(&config_file).unwrap_or_else(|e| {
            warn!("{e}; using default configuration");
            Self::from_defaults()
        })
    }

    /// Load configuration from an explicit file, filling gaps from defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid configuration
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .map_err(|e| format!("Invalid config file {}: {e}", path.display()))?;
        config.merge_defaults(&Self::from_defaults());
        Ok(config)
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to `path`, creating its directory if needed
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys are listed in [`CONFIG_KEYS`]; `out-dir`, `png-name`,
    /// and `pdf-name` are accepted as aliases.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "dpi" => Some(self.render.dpi.to_string()),
            "png_name" | "png-name" => Some(self.render.png_name.clone()),
            "pdf_name" | "pdf-name" => Some(self.render.pdf_name.clone()),
            "show" => Some(self.render.show.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "dpi" => {
                self.render.dpi = value
                    .parse::<u32>()
                    .ok()
                    .filter(|dpi| *dpi > 0)
                    .ok_or_else(|| format!("Invalid value for 'dpi': '{value}'"))?;
            }
            "png_name" | "png-name" => self.render.png_name = value.to_string(),
            "pdf_name" | "pdf-name" => self.render.pdf_name = value.to_string(),
            "show" => self.render.show = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "dpi" => self.render.dpi = defaults.render.dpi,
            "png_name" | "png-name" => self.render.png_name.clone_from(&defaults.render.png_name),
            "pdf_name" | "pdf-name" => self.render.pdf_name.clone_from(&defaults.render.pdf_name),
            "show" => self.render.show = defaults.render.show,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// Succeeds without doing anything if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        Self::reset_at(&Self::get_config_file_path())
    }

    /// Delete the configuration file at `path`, if present
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Default PNG and PDF output paths inside the output directory
    #[must_use]
    pub fn default_outputs(&self) -> Vec<PathBuf> {
        let dir = if self.paths.out_dir.is_empty() {
            Path::new(".")
        } else {
            Path::new(&self.paths.out_dir)
        };
        vec![dir.join(&self.render.png_name), dir.join(&self.render.pdf_name)]
    }

    /// Rendering options for this configuration
    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            dpi: if self.render.dpi == 0 {
                DEFAULT_DPI
            } else {
                self.render.dpi
            },
            show: self.render.show,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  dpi = {}", self.render.dpi)?;
        writeln!(f, "  png_name = \"{}\"", self.render.png_name)?;
        writeln!(f, "  pdf_name = \"{}\"", self.render.pdf_name)?;
        writeln!(f, "  show = {}", self.render.show)?;

        Ok(())
    }
}
