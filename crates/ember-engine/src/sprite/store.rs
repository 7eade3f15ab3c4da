use std::path::Path;

use super::{SpriteLoadError, SpriteSheet};

/// Opaque handle to a sheet in a [`SpriteStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SpriteSheetId(pub(crate) usize);

/// Texture sampling used when sprites are scaled.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SpriteFilter {
    #[default]
    Nearest,
    Linear,
}

/// Append-only registry of loaded sprite sheets.
///
/// Sheets live until the store is dropped; ids stay valid for its lifetime.
#[derive(Debug, Default)]
pub struct SpriteStore {
    sheets: Vec<SpriteSheet>,
    filter: SpriteFilter,
}

impl SpriteStore {
    pub fn new(filter: SpriteFilter) -> Self {
        Self { sheets: Vec::new(), filter }
    }

    pub fn filter(&self) -> SpriteFilter {
        self.filter
    }

    /// Decodes a sheet from disk and registers it.
    pub fn load(&mut self, path: &Path, cell_w: u32, cell_h: u32) -> Result<SpriteSheetId, SpriteLoadError> {
        let sheet = SpriteSheet::open(path, cell_w, cell_h)?;
        log::info!(
            "loaded sprite sheet {} ({}x{}, {}x{} cells)",
            path.display(),
            sheet.width,
            sheet.height,
            sheet.cols(),
            sheet.rows()
        );
        Ok(self.insert(sheet))
    }

    pub fn insert(&mut self, sheet: SpriteSheet) -> SpriteSheetId {
        let id = SpriteSheetId(self.sheets.len());
        self.sheets.push(sheet);
        id
    }

    pub fn get(&self, id: SpriteSheetId) -> Option<&SpriteSheet> {
        self.sheets.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
