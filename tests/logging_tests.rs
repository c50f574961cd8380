//! Log output of a render of the built-in network

#![cfg(feature = "file-logging")]

use logger::{close_file_logging, init_file_logging, set_level, Level};
use metromap::{MetroMapRenderer, RenderOptions};
use std::fs;
use tempfile::TempDir;

#[test]
fn builtin_render_logs_no_warnings() {
    let dir = TempDir::new().expect("temp dir");
    let log = dir.path().join("render.log");
    set_level(Level::Debug);
    init_file_logging(&log).expect("open log file");

    let renderer = MetroMapRenderer::builtin(RenderOptions { dpi: 72, show: false });
    let rendered = renderer.and_then(|r| {
        r.render(&[&dir.path().join("map.svg"), &dir.path().join("fares.txt")])
    });
    close_file_logging();

    assert_eq!(rendered.expect("render").len(), 2);
    let content = fs::read_to_string(&log).expect("read log");
    assert!(!content.contains("[WARN]"), "{content}");
    assert!(!content.contains("[ERROR]"), "{content}");
}
