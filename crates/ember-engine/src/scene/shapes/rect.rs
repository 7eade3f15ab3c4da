use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Rectangle draw payload.
///
/// Outlines are one logical pixel wide and lie inside `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
    pub filled: bool,
}

impl DrawList {
    /// Records a filled rectangle.
    #[inline]
    pub fn push_fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { rect, color, filled: true }));
    }

    /// Records a rectangle outline.
    #[inline]
    pub fn push_outline_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { rect, color, filled: false }));
    }
}
