//! Color model shared between the script bridge and renderers.

pub mod color;

pub use color::Color;
