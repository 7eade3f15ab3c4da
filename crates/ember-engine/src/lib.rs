//! Ember engine crate.
//!
//! Owns the platform, GPU, audio and asset pieces a 2D game host is built on:
//! the window runtime, the draw stream and its renderers, sprite sheets,
//! fonts, sound playback and the geometry types shared with scripts.

pub mod audio;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod sprite;
pub mod text;
pub mod time;
pub mod window;
