use std::path::{Path, PathBuf};

use crate::coords::Rect;

#[derive(Debug, thiserror::Error)]
pub enum SpriteLoadError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid cell size {cell_w}x{cell_h}")]
    InvalidCell { cell_w: u32, cell_h: u32 },
}

/// A decoded image plus its cell grid.
///
/// Pixels are premultiplied RGBA8, row-major, `width * height * 4` bytes.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub(crate) pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub cell_w: u32,
    pub cell_h: u32,
}

impl SpriteSheet {
    /// Decodes `path` (PNG, BMP or JPEG) and slices it into `cell_w` x `cell_h` cells.
    pub fn open(path: &Path, cell_w: u32, cell_h: u32) -> Result<Self, SpriteLoadError> {
        if cell_w == 0 || cell_h == 0 {
            return Err(SpriteLoadError::InvalidCell { cell_w, cell_h });
        }

        let image = image::open(path)
            .map_err(|source| SpriteLoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        Ok(Self::from_rgba8(
            image.width(),
            image.height(),
            image.into_raw(),
            cell_w,
            cell_h,
        ))
    }

    /// Wraps straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut pixels: Vec<u8>, cell_w: u32, cell_h: u32) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        for px in pixels.chunks_exact_mut(4) {
            let a = px[3] as u32;
            for c in &mut px[..3] {
                *c = ((*c as u32 * a + 127) / 255) as u8;
            }
        }

        Self { pixels, width, height, cell_w, cell_h }
    }

    /// Number of whole cells per row.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.width / self.cell_w.max(1)
    }

    /// Number of whole cells per column.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.height / self.cell_h.max(1)
    }

    /// Source region of cell `(col, row)` in sheet pixels.
    ///
    /// Indices are not bounds checked; a cell past the edge samples clamped
    /// border texels.
    #[inline]
    pub fn cell_rect(&self, col: i64, row: i64) -> Rect {
        let (cw, ch) = (self.cell_w as f64, self.cell_h as f64);
        Rect::new(col as f64 * cw, row as f64 * ch, cw, ch)
    }
}
