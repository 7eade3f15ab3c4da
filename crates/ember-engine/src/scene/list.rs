use super::{DrawCmd, DrawKind};

/// Recorded draw stream for a frame.
///
/// Commands paint in the order they were pushed; later commands cover earlier
/// ones. `clear()` keeps the allocation for the next frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Returns items in paint order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Splits the stream into maximal runs of same-kind commands, in paint order.
    pub fn runs(&self) -> impl Iterator<Item = (DrawKind, &[DrawCmd])> {
        self.items
            .chunk_by(|a, b| a.kind() == b.kind())
            .map(|run| (run[0].kind(), run))
    }
}
