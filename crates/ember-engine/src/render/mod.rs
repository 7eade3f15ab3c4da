//! Turns a frame's [`DrawList`](crate::scene::DrawList) into GPU work.
//!
//! Geometry arrives in logical pixels with a top-left origin; the shape
//! shaders map it to clip space through the viewport uniform.

mod ctx;
mod scene;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
