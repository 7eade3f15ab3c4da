//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in submission order
//! - group consecutive commands of one kind into runs so each renderer can
//!   draw a run in a single pass without breaking painter's order
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::{DrawCmd, DrawKind};
pub use list::DrawList;
pub use shapes::rect::RectCmd;
pub use shapes::sprite::SpriteCmd;
pub use shapes::text::TextCmd;
