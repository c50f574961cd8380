//! Opening a produced artifact in the system viewer

use logger::{debug, warn};
use std::path::Path;
use std::process::{Command, Stdio};

/// Viewer commands to try, in order of preference
fn viewer_candidates() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["open"]]
    } else if cfg!(target_os = "windows") {
        &[&["cmd", "/C", "start", ""]]
    } else {
        &[&["xdg-open"], &["gio", "open"], &["sensible-browser"]]
    }
}

/// Open `path` with the first viewer that starts
///
/// The viewer runs detached; failing to find one is logged and otherwise
/// ignored.
pub fn show(path: &Path) {
    match launch(viewer_candidates(), path) {
        Some(program) => debug!("Opened {} with {}", path.display(), program),
        None => warn!("No viewer found to display {}", path.display()),
    }
}

/// Spawn the first candidate command that starts, returning its program name
fn launch<'a>(candidates: &[&'a [&'a str]], path: &Path) -> Option<&'a str> {
    for candidate in candidates {
        let Some((program, args)) = candidate.split_first() else {
            continue;
        };
        let spawned = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => return Some(*program),
            Err(e) => debug!("Viewer {} unavailable: {}", program, e),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_viewers_yield_none() {
        let candidates: &[&[&str]] = &[&[], &["metromap-no-such-viewer"]];
        assert_eq!(launch(candidates, Path::new("map.png")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_first_working_viewer_wins() {
        let candidates: &[&[&str]] = &[&["metromap-no-such-viewer"], &["true"], &["echo"]];
        assert_eq!(launch(candidates, Path::new("map.png")), Some("true"));
    }
}
