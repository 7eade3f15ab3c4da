//! Time subsystem.
//!
//! Frame timing that can be driven by an injected `Instant`, so loop logic is
//! testable without sleeping:
//! - one `FrameClock` per game loop
//! - `tick_at(now)` once per simulated frame to obtain `FrameTime`
//! - `reset_at(now)` while the simulation is suspended

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
