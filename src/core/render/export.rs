//! Output formats and the encoders that turn the SVG document into files

use crate::core::error::MapError;
use logger::debug;
use resvg::tiny_skia::{Color as SkiaColor, Pixmap, Transform};
use resvg::usvg;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported output formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Raster image at the configured DPI
    Png,
    /// Vector document for printing
    Pdf,
    /// The SVG document itself
    Svg,
    /// Markdown with a Mermaid diagram of the network
    Markdown,
    /// Plain-text fare guide
    Text,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }

    /// Short description printed next to each produced file
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Png => "High-resolution PNG",
            Self::Pdf => "Print-ready PDF",
            Self::Svg => "Scalable vector graphic",
            Self::Markdown => "Mermaid network diagram",
            Self::Text => "Plain-text fare guide",
        }
    }

    /// Whether the format is drawn from the rendered figure
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Png | Self::Pdf | Self::Svg)
    }

    /// Infer the format from a path's extension
    ///
    /// # Errors
    /// Returns [`MapError::UnsupportedFormat`] if the path has no extension or an
    /// unknown one
    pub fn from_path(path: &Path) -> Result<Self, MapError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| MapError::UnsupportedFormat(path.to_path_buf()))
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            "svg" => Ok(Self::Svg),
            "md" | "markdown" => Ok(Self::Markdown),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Pdf => write!(f, "pdf"),
            Self::Svg => write!(f, "svg"),
            Self::Markdown => write!(f, "markdown"),
            Self::Text => write!(f, "text"),
        }
    }
}

fn export_error(format: OutputFormat, message: impl fmt::Display) -> MapError {
    MapError::Export {
        format: format.to_string(),
        message: message.to_string(),
    }
}

/// Pixel size of a figure of `width` x `height` points at `dpi`
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn pixel_size(width: f64, height: f64, dpi: u32) -> (u32, u32) {
    // Divide last: 300 / 72 is inexact and would push whole sizes up a pixel
    let pixels = |points: f64| (points * f64::from(dpi) / 72.0).ceil().max(1.0) as u32;
    (pixels(width), pixels(height))
}

/// Rasterize an SVG document whose user unit is one point
///
/// # Errors
/// Returns [`MapError::Export`] if the document cannot be parsed, the surface
/// cannot be allocated, or PNG encoding fails
pub fn encode_png(svg: &str, dpi: u32) -> Result<Vec<u8>, MapError> {
    if dpi == 0 {
        return Err(MapError::invalid("render.dpi", "must be positive"));
    }
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| export_error(OutputFormat::Png, e))?;

    let size = tree.size();
    let (width, height) = pixel_size(f64::from(size.width()), f64::from(size.height()), dpi);
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        export_error(
            OutputFormat::Png,
            format!("failed to allocate {width}x{height} surface"),
        )
    })?;
    pixmap.fill(SkiaColor::WHITE);

    #[allow(clippy::cast_possible_truncation)]
    let scale = (f64::from(dpi) / 72.0) as f32;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    debug!("Rasterized figure to {width}x{height} px at {dpi} DPI");

    pixmap
        .encode_png()
        .map_err(|e| export_error(OutputFormat::Png, e))
}

/// Convert an SVG document to a single-page PDF of the same size in points
///
/// Text is converted to outlines, and resource dictionaries are sorted, so
/// the same document always yields the same bytes.
///
/// # Errors
/// Returns [`MapError::Export`] if the document cannot be parsed or converted
pub fn encode_pdf(svg: &str) -> Result<Vec<u8>, MapError> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|e| export_error(OutputFormat::Pdf, e))?;

    // Embedded fonts are written in hash order, outlines are not
    let conversion = svg2pdf::ConversionOptions {
        embed_text: false,
        ..svg2pdf::ConversionOptions::default()
    };
    let mut pdf = svg2pdf::to_pdf(&tree, conversion, svg2pdf::PageOptions::default())
        .map_err(|e| export_error(OutputFormat::Pdf, e))?;
    sort_resource_entries(&mut pdf);
    Ok(pdf)
}

/// Resource dictionaries the converter fills from a hash map
const RESOURCE_KEYS: [&[u8]; 6] = [
    b"/ExtGState <<",
    b"/XObject <<",
    b"/Pattern <<",
    b"/Shading <<",
    b"/Font <<",
    b"/ColorSpace <<",
];

fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// Sort the entries of every resource dictionary in place
///
/// Only whole lines swap places, so the length of every object and therefore
/// the cross-reference table stay valid. Stream data is skipped.
fn sort_resource_entries(pdf: &mut [u8]) {
    let mut i = 0;
    while i < pdf.len() {
        let rest = &pdf[i..];
        if rest.starts_with(b"stream\n") && i > 0 && pdf[i - 1] == b'\n' {
            match find(pdf, i, b"\nendstream") {
                Some(end) => {
                    i = end + b"\nendstream".len();
                    continue;
                }
                None => return,
            }
        }
        if let Some(key) = RESOURCE_KEYS.iter().find(|key| rest.starts_with(key)) {
            let open = i + key.len();
            if let Some(close) = find(pdf, open, b">>") {
                sort_lines(&mut pdf[open..close]);
                i = close;
                continue;
            }
        }
        i += 1;
    }
}

/// Sort the `/Name value` lines between `<<` and `>>`
///
/// Leaves the body alone unless every entry is a single line at the same
/// indentation.
fn sort_lines(body: &mut [u8]) {
    if find(body, 0, b"<<").is_some() {
        return;
    }
    let lines: Vec<&[u8]> = body.split(|b| *b == b'\n').collect();
    // First piece precedes the first entry, last piece indents `>>`
    if lines.len() < 4 || !lines[0].is_empty() {
        return;
    }
    let mut entries: Vec<Vec<u8>> = lines[1..lines.len() - 1]
        .iter()
        .map(|line| line.to_vec())
        .collect();
    let indent = entries[0].iter().take_while(|b| **b == b' ').count();
    let uniform = entries.iter().all(|entry| {
        entry.len() > indent
            && entry[..indent].iter().all(|b| *b == b' ')
            && entry[indent] == b'/'
    });
    if !uniform {
        return;
    }
    entries.sort();

    let mut sorted = Vec::with_capacity(body.len());
    for entry in &entries {
        sorted.push(b'\n');
        sorted.extend_from_slice(entry);
    }
    sorted.push(b'\n');
    sorted.extend_from_slice(lines[lines.len() - 1]);
    if sorted.len() == body.len() {
        body.copy_from_slice(&sorted);
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory
///
/// The file only appears under its final name once fully written; on failure
/// the temporary file is removed and nothing is left at `path`.
///
/// # Errors
/// Returns [`MapError::Io`] if the directory does not exist or is not writable
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MapError> {
    let io_error = |source: std::io::Error| MapError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    // Same mode as any newly created file; the default 0600 is for secrets
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(io_error)?;
    tmp.write_all(bytes).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path_uses_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/map.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("guide.txt")).unwrap(),
            OutputFormat::Text
        );
        assert!(matches!(
            OutputFormat::from_path(Path::new("map.gif")),
            Err(MapError::UnsupportedFormat(p)) if p == PathBuf::from("map.gif")
        ));
        assert!(OutputFormat::from_path(Path::new("map")).is_err());
    }

    #[test]
    fn test_format_round_trips_through_extension() {
        for format in [
            OutputFormat::Png,
            OutputFormat::Pdf,
            OutputFormat::Svg,
            OutputFormat::Markdown,
            OutputFormat::Text,
        ] {
            assert_eq!(format.extension().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_pixel_size_scales_with_dpi() {
        assert_eq!(pixel_size(1440.0, 864.0, 300), (6000, 3600));
        assert_eq!(pixel_size(72.0, 36.0, 72), (72, 36));
        assert_eq!(pixel_size(10.1, 10.0, 72), (11, 10));
        assert_eq!(pixel_size(1117.0, 760.0, 300), (4655, 3167));
    }

    #[test]
    fn test_resource_entries_are_sorted() {
        let pdf = b"1 0 obj\n<<\n  /Resources <<\n    /ExtGState <<\n      /gs2 9 0 R\n      /gs0 7 0 R\n      /gs1 8 0 R\n    >>\n  >>\n>>\nendobj\n";
        let mut shuffled = pdf.to_vec();
        sort_resource_entries(&mut shuffled);
        let text = String::from_utf8(shuffled).unwrap();
        assert_eq!(text.len(), pdf.len());
        let gs0 = text.find("/gs0 7 0 R").unwrap();
        let gs1 = text.find("/gs1 8 0 R").unwrap();
        let gs2 = text.find("/gs2 9 0 R").unwrap();
        assert!(gs0 < gs1 && gs1 < gs2);
    }

    #[test]
    fn test_stream_data_is_not_touched() {
        let pdf = b"2 0 obj\n<<\n  /Length 40\n>>\nstream\n/ExtGState <<\n  /b 2 0 R\n  /a 1 0 R\n>>\nendstream\nendobj\n";
        let mut copy = pdf.to_vec();
        sort_resource_entries(&mut copy);
        assert_eq!(copy, pdf.to_vec());
    }

    #[test]
    fn test_pdf_encoding_is_repeatable() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40" viewBox="0 0 40 40">
<circle cx="10" cy="10" r="8" fill="#e74c3c" fill-opacity="0.15" stroke="#e74c3c" stroke-opacity="0.6"/>
<circle cx="30" cy="30" r="8" fill="#27ae60" fill-opacity="0.3"/>
<line x1="0" y1="0" x2="40" y2="40" stroke="#000000" stroke-opacity="0.7"/>
<rect x="5" y="25" width="10" height="10" fill="#ffffff" fill-opacity="0.8"/>
</svg>"##;
        let first = encode_pdf(svg).unwrap();
        for _ in 0..5 {
            assert_eq!(encode_pdf(svg).unwrap(), first);
        }
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.svg");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("map.png");
        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(err.is_io());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_uses_regular_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("map.png");
        let plain = dir.path().join("plain.png");
        write_atomic(&artifact, b"data").unwrap();
        std::fs::write(&plain, b"data").unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&artifact), mode(&plain));
    }

    #[test]
    fn test_encode_png_fills_white() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"></svg>"#;
        let png = encode_png(svg, 144).unwrap();
        let pixmap = Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (20, 20));
        let pixel = pixmap.pixel(5, 5).unwrap();
        assert_eq!(
            (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()),
            (255, 255, 255, 255)
        );
    }

    #[test]
    fn test_malformed_svg_is_export_error() {
        assert!(matches!(
            encode_png("<not-svg", 300),
            Err(MapError::Export { .. })
        ));
        assert!(matches!(encode_pdf("<not-svg"), Err(MapError::Export { .. })));
    }
}
