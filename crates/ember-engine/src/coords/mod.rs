//! Geometry kernel shared by the script bridge and the renderers.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Vector` and `Rect` are double precision; renderers narrow to `f32` when
//! building instance data and convert to NDC in shaders using a viewport uniform.

mod rect;
mod vector;
mod viewport;

pub use rect::Rect;
pub use vector::Vector;
pub use viewport::Viewport;
