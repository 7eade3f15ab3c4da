use crate::scene::shapes::rect::RectCmd;
use crate::scene::shapes::sprite::SpriteCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic draw command stream.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and in `DrawKind`
/// - implement push helpers inside that shape module
/// - add a matching renderer under `render::shapes::*`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Sprite(SpriteCmd),
    Text(TextCmd),
}

/// Which renderer consumes a command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawKind {
    Rect,
    Sprite,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Rect(_) => DrawKind::Rect,
            DrawCmd::Sprite(_) => DrawKind::Sprite,
            DrawCmd::Text(_) => DrawKind::Text,
        }
    }
}
