//! Render command handler

use logger::{debug, verbose};
use metromap::config::Config;
use metromap::{Artifact, MapError, MetroMapRenderer, RenderOptions};
use std::path::PathBuf;

/// Render the metro map to `outputs`, or to the configured defaults when empty
///
/// CLI flags win over configuration: `--dpi` replaces the configured
/// resolution and `--no-display` suppresses the viewer.
pub fn run(outputs: &[PathBuf], no_display: bool, dpi: Option<u32>, config: &Config) {
    let mut options = config.render_options();
    if let Some(dpi) = dpi {
        options.dpi = dpi;
    }
    if no_display {
        options.show = false;
    }

    let outputs = if outputs.is_empty() {
        let defaults = config.default_outputs();
        if let Some(dir) = defaults.first().and_then(|p| p.parent()) {
            if !dir.as_os_str().is_empty() && std::fs::create_dir_all(dir).is_err() {
                eprintln!("✗ Failed to create output directory: {}", dir.display());
                std::process::exit(1);
            }
        }
        defaults
    } else {
        outputs.to_vec()
    };

    debug!("Rendering {} output(s) at {} DPI", outputs.len(), options.dpi);

    match render(&outputs, options) {
        Ok(artifacts) => {
            println!("Metro map generated successfully:");
            for artifact in &artifacts {
                println!(
                    "✓ {} ({})",
                    artifact.path.display(),
                    artifact.description()
                );
            }
            verbose!("Wrote {} file(s)", artifacts.len());
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

fn render(outputs: &[PathBuf], options: RenderOptions) -> Result<Vec<Artifact>, MapError> {
    MetroMapRenderer::builtin(options)?.render(outputs)
}
