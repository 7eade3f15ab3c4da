use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList};
use crate::sprite::SpriteSheetId;

/// Textured quad copied from a region of a sprite sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub sheet: SpriteSheetId,
    /// Source region in sheet pixels.
    pub src: Rect,
    /// Destination in logical pixels.
    pub dst: Rect,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl DrawList {
    #[inline]
    pub fn push_sprite(&mut self, cmd: SpriteCmd) {
        self.push(DrawCmd::Sprite(cmd));
    }
}
