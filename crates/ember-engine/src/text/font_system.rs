use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

/// Error returned when a font cannot be read or parsed.
#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Parse(String),
}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns every parsed font face for the lifetime of the host.
///
/// Faces are size independent; the pixel size travels with each draw command.
/// Loading the same file twice returns the existing id.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    by_path: HashMap<PathBuf, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Reads and parses a font file, reusing a face already loaded from `path`.
    pub fn load_file(&mut self, path: &Path) -> Result<FontId, FontLoadError> {
        if let Some(id) = self.by_path.get(path) {
            return Ok(*id);
        }

        let bytes = std::fs::read(path).map_err(|source| FontLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let id = self.load_font(&bytes)?;
        self.by_path.insert(path.to_path_buf(), id);
        log::info!("loaded font {}", path.display());
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Bounding box `(width, height)` of a single line of text, in logical pixels.
    ///
    /// Width runs to the pen position after the last glyph so trailing spaces
    /// count; height is at least one line.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> (f32, f32) {
        let Some(font) = self.get(id) else {
            return (0.0, size);
        };

        let line_height = font
            .horizontal_line_metrics(size)
            .map_or(size, |m| m.new_line_size);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);

        (w, line_height.max(layout.height()))
    }
}
