//! Sprite sheets: decoded images cut into a grid of equal cells.
//!
//! Sheets are decoded on the CPU when loaded; the sprite renderer uploads each
//! one to a texture the first time it is drawn.

mod sheet;
mod store;

pub use sheet::{SpriteLoadError, SpriteSheet};
pub use store::{SpriteFilter, SpriteSheetId, SpriteStore};
