//! Station display rendering
//!
//! The renderer lays out the figure as a [`Scene`] of draw operations, replays
//! it onto an [`SvgCanvas`], and derives every requested artifact from that
//! SVG document. The figure is cropped to its content before export.

pub mod canvas;
pub mod display;
pub mod export;
pub mod info_panel;
pub mod layout;
pub mod map_panel;
pub mod scene;
pub mod svg;

use crate::core::error::MapError;
use crate::core::models::{MetroNetwork, Point, Rect};
use crate::core::report::{FareGuide, MermaidGenerator, ReportGenerator};
use canvas::{TextAnchor, TextStyle, VerticalAlign};
use layout::{FigureLayout, CROP_PADDING, TITLE_SIZE};
use logger::{debug, info};
use std::path::{Path, PathBuf};

pub use canvas::Canvas;
pub use export::OutputFormat;
pub use scene::{DrawOp, Layer, Scene};
pub use svg::SvgCanvas;

/// Default raster resolution
pub const DEFAULT_DPI: u32 = 300;

/// Rendering settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Raster resolution of PNG output
    pub dpi: u32,
    /// Open the first artifact in the system viewer after writing
    pub show: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            show: false,
        }
    }
}

/// A file written by [`MetroMapRenderer::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Where the file was written
    pub path: PathBuf,
    /// Format inferred from the extension
    pub format: OutputFormat,
}

impl Artifact {
    /// Human-readable description of the artifact kind
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.format.description()
    }
}

/// Renders a validated network to image and text artifacts
#[derive(Debug, Clone)]
pub struct MetroMapRenderer {
    network: MetroNetwork,
    options: RenderOptions,
}

impl MetroMapRenderer {
    /// Create a renderer, validating the network and options up front
    ///
    /// # Errors
    /// Returns a configuration error if the network is inconsistent or the
    /// DPI is zero
    pub fn new(network: MetroNetwork, options: RenderOptions) -> Result<Self, MapError> {
        network.validate()?;
        Self::checked(network, options)
    }

    /// Renderer for the network compiled into the binary
    ///
    /// # Errors
    /// Returns a configuration error if the embedded network or the options
    /// are invalid
    pub fn builtin(options: RenderOptions) -> Result<Self, MapError> {
        // Already validated while loading
        Self::checked(MetroNetwork::builtin()?, options)
    }

    fn checked(network: MetroNetwork, options: RenderOptions) -> Result<Self, MapError> {
        if options.dpi == 0 {
            return Err(MapError::invalid("render.dpi", "must be positive"));
        }
        Ok(Self { network, options })
    }

    /// The network being rendered
    #[must_use]
    pub const fn network(&self) -> &MetroNetwork {
        &self.network
    }

    /// The rendering options
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Lay out the full figure: title, map panel, info panel
    #[must_use]
    pub fn scene(&self) -> Scene {
        let layout = FigureLayout::station_display();
        let mut scene = Scene::new(layout.figure.width, layout.figure.height);

        let title_style = TextStyle::new(TITLE_SIZE)
            .bold()
            .anchor(TextAnchor::Middle)
            .valign(VerticalAlign::Top);
        let panel = &self.network.panel;
        for (line, content) in [&panel.title, &panel.subtitle].into_iter().enumerate() {
            scene.text(
                Layer::Title,
                Point::new(layout.figure.center().x, layout.title_line_top(line)),
                content,
                title_style,
            );
        }

        map_panel::draw(&mut scene, &self.network, layout.map);
        info_panel::draw(&mut scene, &self.network, layout.info);
        debug!("Scene laid out with {} draw operations", scene.len());
        scene
    }

    /// Region of the figure kept in exports, in points
    #[must_use]
    pub fn crop(&self) -> Rect {
        Self::crop_of(&self.scene())
    }

    fn crop_of(scene: &Scene) -> Rect {
        scene.tight_bounds(CROP_PADDING).round_out()
    }

    /// The cropped figure as an SVG document
    #[must_use]
    pub fn render_svg(&self) -> String {
        let scene = self.scene();
        let mut canvas = SvgCanvas::new();
        scene.render_to(&mut canvas);
        canvas.finish(Self::crop_of(&scene))
    }

    fn encode(&self, format: OutputFormat, svg: Option<&str>) -> Result<Vec<u8>, MapError> {
        let figure = || svg.map_or_else(|| self.render_svg(), ToString::to_string);
        match format {
            OutputFormat::Svg => Ok(figure().into_bytes()),
            OutputFormat::Png => export::encode_png(&figure(), self.options.dpi),
            OutputFormat::Pdf => export::encode_pdf(&figure()),
            OutputFormat::Markdown => Ok(MermaidGenerator::new().render(&self.network)?.into_bytes()),
            OutputFormat::Text => Ok(FareGuide::new().render(&self.network)?.into_bytes()),
        }
    }

    /// Write every requested output, inferring each format from its extension
    ///
    /// All paths are checked before anything is drawn, so an unsupported
    /// extension writes nothing. Each file is written atomically.
    ///
    /// # Errors
    /// Returns [`MapError::UnsupportedFormat`] for an unknown extension,
    /// [`MapError::Io`] if a file cannot be written, or [`MapError::Export`] if
    /// encoding fails
    pub fn render<P: AsRef<Path>>(&self, outputs: &[P]) -> Result<Vec<Artifact>, MapError> {
        let requests = outputs
            .iter()
            .map(|p| {
                let path = p.as_ref();
                OutputFormat::from_path(path).map(|format| (path, format))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let svg = requests
            .iter()
            .any(|(_, format)| format.is_image())
            .then(|| self.render_svg());

        let mut artifacts = Vec::with_capacity(requests.len());
        for (path, format) in requests {
            let bytes = self.encode(format, svg.as_deref())?;
            export::write_atomic(path, &bytes)?;
            info!("Wrote {} ({} bytes)", path.display(), bytes.len());
            artifacts.push(Artifact {
                path: path.to_path_buf(),
                format,
            });
        }

        if self.options.show {
            if let Some(first) = artifacts.first() {
                display::show(&first.path);
            }
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MetroMapRenderer {
        MetroMapRenderer::builtin(RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.dpi, 300);
        assert!(!options.show);
    }

    #[test]
    fn test_zero_dpi_is_rejected() {
        let network = MetroNetwork::builtin().unwrap();
        let err = MetroMapRenderer::new(network, RenderOptions { dpi: 0, show: false })
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_scene_has_titles_and_both_panels() {
        let scene = renderer().scene();
        let texts: Vec<&str> = scene.texts().collect();
        assert_eq!(texts[0], "METRO SYSTEM MAP");
        assert_eq!(texts[1], "Zones, Fares & Discounts");
        assert!(scene.layer(Layer::Station).count() > 0);
        assert!(scene.layer(Layer::InfoPanel).count() > 0);
        assert!(scene.layer(Layer::Footer).count() > 0);
    }

    #[test]
    fn test_crop_contains_all_content_within_figure_plus_padding() {
        let renderer = renderer();
        let scene = renderer.scene();
        let crop = renderer.crop();
        assert!(crop.contains_rect(&scene.content_bounds()));
        assert!(crop.width <= layout::FIGURE_WIDTH + 2.0 * CROP_PADDING + 2.0);
        assert!(crop.height <= layout::FIGURE_HEIGHT + 2.0 * CROP_PADDING + 2.0);
        assert!((crop.width - crop.width.round()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_svg_is_deterministic() {
        let renderer = renderer();
        assert_eq!(renderer.render_svg(), renderer.render_svg());
    }

    #[test]
    fn test_unsupported_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("map.svg");
        let bad = dir.path().join("map.gif");
        let err = renderer().render(&[&good, &bad]).unwrap_err();
        assert!(matches!(err, MapError::UnsupportedFormat(_)));
        assert!(!good.exists());
    }

    #[test]
    fn test_render_svg_and_text_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("map.svg");
        let guide = dir.path().join("guide.txt");
        let artifacts = renderer().render(&[&svg, &guide]).unwrap();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].format, OutputFormat::Svg);
        assert_eq!(artifacts[1].description(), "Plain-text fare guide");
        assert!(std::fs::read_to_string(&svg).unwrap().starts_with("<svg"));
        assert!(std::fs::read_to_string(&guide)
            .unwrap()
            .contains("Downtown Central"));
    }
}
