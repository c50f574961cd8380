//! Integration smoke tests for the `metromap` binary

use metromap::get_version;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn metromap(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_metromap"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run metromap")
}

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn render_writes_requested_outputs() {
    let dir = TempDir::new().expect("temp dir");
    let png = dir.path().join("out.png");
    let pdf = dir.path().join("out.pdf");
    let config = dir.path().join("config.toml");

    let output = metromap(
        &config,
        &[
            "render",
            png.to_str().expect("utf-8 path"),
            pdf.to_str().expect("utf-8 path"),
            "--no-display",
            "--dpi",
            "72",
        ],
    );

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(High-resolution PNG)"), "{stdout}");
    assert!(stdout.contains("(Print-ready PDF)"), "{stdout}");
    assert!(fs_len(&png) > 0);
    assert!(fs_len(&pdf) > 0);
    assert!(!config.exists(), "rendering must not write the config file");

    // The built-in network is clean, so a render logs no warnings
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("[WARN]"), "{stderr}");
    assert!(!stdout.contains("[WARN]"), "{stdout}");
}

#[test]
fn pdf_is_identical_across_runs() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("config.toml");
    let first = dir.path().join("a.pdf");
    let second = dir.path().join("b.pdf");

    for pdf in [&first, &second] {
        let output = metromap(
            &config,
            &["render", pdf.to_str().expect("utf-8 path"), "--no-display"],
        );
        assert!(output.status.success(), "{output:?}");
    }

    let first = std::fs::read(&first).expect("read first pdf");
    let second = std::fs::read(&second).expect("read second pdf");
    assert!(first.starts_with(b"%PDF-"));
    assert!(first == second, "PDF bytes differ between runs");
}

#[test]
fn unsupported_output_exits_with_error() {
    let dir = TempDir::new().expect("temp dir");
    let gif = dir.path().join("out.gif");

    let output = metromap(
        &dir.path().join("config.toml"),
        &["render", gif.to_str().expect("utf-8 path"), "--no-display"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported output format"));
    assert!(!gif.exists());
}

#[test]
fn config_set_persists_to_explicit_file() {
    let dir = TempDir::new().expect("temp dir");
    let config = dir.path().join("config.toml");

    let output = metromap(&config, &["config", "set", "dpi", "150"]);
    assert!(output.status.success(), "{output:?}");
    assert!(config.exists());

    let output = metromap(&config, &["config", "get", "dpi"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "150");

    let output = metromap(&config, &["config", "set", "dpi", "zero"]);
    assert_eq!(output.status.code(), Some(1));
}

fn fs_len(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
