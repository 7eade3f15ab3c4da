//! Lua scripting host for the ember engine.
//!
//! A game is a Lua script that defines lifecycle callbacks (`_load`,
//! `_update`, `_draw` and optional input hooks) and talks to the engine
//! through `require("core.*")` modules. This crate owns:
//!
//! - [`Script`]: one interpreter, its module search path and typed globals
//! - [`Settings`]: window/render options read from a settings script
//! - [`Level`]: the lifecycle dispatcher over a game script
//! - [`FrameDriver`]: the run/pause/quit state machine that paces a level
//! - the native capability modules, backed by a shared [`HostContext`]

mod capability;
mod context;
mod driver;
mod error;
mod host;
mod level;
mod settings;

pub use context::{HostContext, SharedContext};
pub use driver::{FrameDriver, GameState, Stage};
pub use error::{DispatchError, FrameError, ScriptError};
pub use host::Script;
pub use level::{Hook, Level};
pub use settings::Settings;

#[cfg(test)]
mod testing;
