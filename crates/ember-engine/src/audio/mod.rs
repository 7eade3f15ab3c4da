//! Audio output.
//!
//! Two channels of behaviour:
//! - effects mix freely; each play starts a new voice
//! - music plays on a single track; starting new music replaces the old one
//!
//! Sounds are read fully into memory and validated when loaded, so a failed
//! decode surfaces at load time rather than on first play.

mod device;
mod rodio_backend;

pub use device::{AudioDevice, AudioError, NullAudio, SoundId};
pub use rodio_backend::RodioAudio;
