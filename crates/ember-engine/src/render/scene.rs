use crate::scene::{DrawKind, DrawList};
use crate::sprite::SpriteStore;
use crate::text::FontSystem;

use super::shapes::rect::RectRenderer;
use super::shapes::sprite::SpriteRenderer;
use super::shapes::text::TextRenderer;
use super::{RenderCtx, RenderTarget};

/// Draws a whole [`DrawList`] in one render pass, preserving paint order.
///
/// The pass loads the existing target contents; clearing to the background
/// color happens before this is called.
#[derive(Default)]
pub struct SceneRenderer {
    rects: RectRenderer,
    sprites: SpriteRenderer,
    text: TextRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints `list` over the target in command order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        list: &DrawList,
        sprites: &SpriteStore,
        fonts: &FontSystem,
    ) {
        if list.is_empty() {
            return;
        }

        self.rects.prepare(ctx, list);
        self.sprites.prepare(ctx, list, sprites);
        self.text.prepare(ctx, list, fonts);

        let mut rpass = target.begin_pass("ember scene", None);

        let mut ordinals = RunOrdinals::default();
        for (kind, _) in list.runs() {
            let run = ordinals.next(kind);
            match kind {
                DrawKind::Rect => self.rects.paint(&mut rpass, run),
                DrawKind::Sprite => self.sprites.paint(&mut rpass, run),
                DrawKind::Text => self.text.paint(&mut rpass, run),
            }
        }
    }
}

/// Counts runs per kind so each renderer is asked for its own n-th batch.
#[derive(Debug, Default)]
struct RunOrdinals {
    rect: usize,
    sprite: usize,
    text: usize,
}

impl RunOrdinals {
    fn next(&mut self, kind: DrawKind) -> usize {
        let slot = match kind {
            DrawKind::Rect => &mut self.rect,
            DrawKind::Sprite => &mut self.sprite,
            DrawKind::Text => &mut self.text,
        };
        let n = *slot;
        *slot += 1;
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_count_each_kind_separately() {
        let mut o = RunOrdinals::default();
        assert_eq!(o.next(DrawKind::Rect), 0);
        assert_eq!(o.next(DrawKind::Text), 0);
        assert_eq!(o.next(DrawKind::Rect), 1);
        assert_eq!(o.next(DrawKind::Sprite), 0);
        assert_eq!(o.next(DrawKind::Rect), 2);
        assert_eq!(o.next(DrawKind::Text), 1);
    }
}
