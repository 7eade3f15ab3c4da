pub(crate) mod rect;
pub(crate) mod sprite;
pub(crate) mod text;
