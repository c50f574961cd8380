//! Integration tests for configuration management

use metromap::config::{Config, ConfigOverrides};
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
    assert_eq!(config.render.dpi, 300);
    assert!(config.render.png_name.ends_with(".png"));
    assert!(config.render.pdf_name.ends_with(".pdf"));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
out_dir = "./maps"

[render]
dpi = 150
png_name = "map.png"
pdf_name = "map.pdf"
show = true
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./maps");
    assert_eq!(config.render.dpi, 150);
    assert_eq!(config.render.png_name, "map.png");
    assert_eq!(config.render.pdf_name, "map.pdf");
    assert!(config.render.show);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields fall back to serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.out_dir, "");
    assert_eq!(config.render.dpi, 0);
    assert!(!config.render.show);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$METROMAP/test.log"

[paths]
out_dir = "$METROMAP/maps"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("metromap"));
    assert!(!config.logging.file.contains("$METROMAP"));
    assert!(config.paths.out_dir.ends_with("maps"));
    assert!(!config.paths.out_dir.contains("$METROMAP"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config.set("dpi", "600").expect("Failed to set dpi");
    assert_eq!(config.render.dpi, 600);
    assert_eq!(config.render_options().dpi, 600);

    config.set("out-dir", "/srv/maps").expect("alias should work");
    assert_eq!(config.get("out_dir").unwrap(), "/srv/maps");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("dpi", "0").is_err());
    assert!(config.set("dpi", "-3").is_err());
    assert!(config.set("show", "maybe").is_err());

    assert_eq!(config, before);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("pdf_name", "other.pdf").expect("Failed to set pdf_name");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("pdf_name", &defaults)
        .expect("Failed to unset pdf_name");

    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.render.pdf_name, defaults.render.pdf_name);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("dpi", "72").expect("Failed to set dpi");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file).expect("Failed to load config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.render.dpi, 72);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let nested = temp_dir.path().join("a").join("b").join("config.toml");

    Config::from_defaults()
        .save_to(&nested)
        .expect("Failed to save config");

    assert!(nested.exists());
}

#[test]
fn test_load_from_fills_missing_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    std::fs::write(&config_file, "[render]\ndpi = 96\n").expect("Failed to write config");

    let loaded = Config::load_from(&config_file).expect("Failed to load config");
    let defaults = Config::from_defaults();

    assert_eq!(loaded.render.dpi, 96);
    assert_eq!(loaded.render.png_name, defaults.render.png_name);
    assert_eq!(loaded.logging.level, defaults.logging.level);
}

#[test]
fn test_load_from_rejects_invalid_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    std::fs::write(&config_file, "[render\ndpi = ").expect("Failed to write config");

    let err = Config::load_from(&config_file).unwrap_err();
    assert!(err.contains("Invalid config file"), "{err}");

    let missing = config_file.with_file_name("missing.toml");
    assert!(Config::load_from(&missing).is_err());
}

#[test]
fn test_reset_at_removes_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    Config::from_defaults()
        .save_to(&config_file)
        .expect("Failed to save config");

    Config::reset_at(&config_file).expect("Failed to reset");
    assert!(!config_file.exists());

    // A second reset is a no-op
    Config::reset_at(&config_file).expect("Reset of missing file should succeed");
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        out_dir: Some("./custom_maps".to_string()),
        dpi: Some(150),
        show: Some(false),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./custom_maps");
    assert_eq!(config.render.dpi, 150);
    assert!(!config.render.show);
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
    assert_eq!(config.render, defaults.render);
}

#[test]
fn test_default_outputs_join_out_dir() {
    let mut config = Config::from_defaults();
    config.set("out_dir", "/srv/maps").expect("Failed to set out_dir");

    let outputs = config.default_outputs();

    assert_eq!(outputs.len(), 2);
    assert_eq!(
        outputs[0],
        PathBuf::from("/srv/maps").join(&config.render.png_name)
    );
    assert_eq!(
        outputs[1],
        PathBuf::from("/srv/maps").join(&config.render.pdf_name)
    );
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[render]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("out_dir"));
    assert!(display_str.contains("dpi = 300"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
out_dir = ""

[render]
dpi = 0
png_name = ""
pdf_name = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.render.dpi, defaults.render.dpi);
    assert_eq!(config.render.png_name, defaults.render.png_name);
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[render]
dpi = 72
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.render.dpi, 72);
}

#[test]
fn test_get_metromap_dir() {
    let dir = Config::get_metromap_dir();

    assert!(dir.to_string_lossy().contains("metromap"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
