use std::collections::HashSet;

use mlua::{IntoLuaMulti, Value};

use crate::error::DispatchError;
use crate::host::Script;

/// Lifecycle callbacks a game script may define.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Hook {
    Load,
    Update,
    Draw,
    KeyUp,
    KeyDown,
    MouseUp,
    MouseDown,
    MouseMove,
}

impl Hook {
    /// Global function name the script defines.
    pub fn name(self) -> &'static str {
        match self {
            Hook::Load => "_load",
            Hook::Update => "_update",
            Hook::Draw => "_draw",
            Hook::KeyUp => "_keyup",
            Hook::KeyDown => "_keydown",
            Hook::MouseUp => "_mouseup",
            Hook::MouseDown => "_mousedown",
            Hook::MouseMove => "_mousemove",
        }
    }

    /// A game without `_load`, `_update` and `_draw` cannot run; input hooks
    /// may be left out.
    pub fn required(self) -> bool {
        matches!(self, Hook::Load | Hook::Update | Hook::Draw)
    }
}

/// Dispatches lifecycle events into a loaded game script.
///
/// Callbacks are looked up by name on every call, so a script may redefine
/// them at runtime. Return values are discarded.
pub struct Level {
    script: Script,
    reported_missing: HashSet<Hook>,
}

impl Level {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            reported_missing: HashSet::new(),
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn load(&mut self) -> Result<(), DispatchError> {
        self.call(Hook::Load, ())
    }

    pub fn update(&mut self, dt: f64) -> Result<(), DispatchError> {
        self.call(Hook::Update, dt)
    }

    pub fn draw(&mut self) -> Result<(), DispatchError> {
        self.call(Hook::Draw, ())
    }

    pub fn keyup(&mut self, key: &str) -> Result<(), DispatchError> {
        self.call(Hook::KeyUp, key)
    }

    pub fn keydown(&mut self, key: &str) -> Result<(), DispatchError> {
        self.call(Hook::KeyDown, key)
    }

    pub fn mouseup(&mut self, button: &str, state: &str, x: i64, y: i64) -> Result<(), DispatchError> {
        self.call(Hook::MouseUp, (button, state, x, y))
    }

    pub fn mousedown(&mut self, button: &str, state: &str, x: i64, y: i64) -> Result<(), DispatchError> {
        self.call(Hook::MouseDown, (button, state, x, y))
    }

    pub fn mousemove(
        &mut self,
        state: &str,
        x: i64,
        y: i64,
        rel_x: i64,
        rel_y: i64,
    ) -> Result<(), DispatchError> {
        self.call(Hook::MouseMove, (state, x, y, rel_x, rel_y))
    }

    fn call(&mut self, hook: Hook, args: impl IntoLuaMulti) -> Result<(), DispatchError> {
        let callback = self
            .script
            .lua()
            .globals()
            .get::<Value>(hook.name())
            .unwrap_or(Value::Nil);

        let Value::Function(f) = callback else {
            if hook.required() {
                return Err(DispatchError::MissingHook { hook: hook.name() });
            }
            if self.reported_missing.insert(hook) {
                log::debug!("game script has no {}; ignoring", hook.name());
            }
            return Ok(());
        };

        f.call::<()>(args).map_err(|e| DispatchError::Runtime {
            hook: hook.name(),
            message: e.to_string(),
        })
    }
}
