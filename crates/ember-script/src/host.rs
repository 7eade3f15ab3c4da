use std::path::Path;

use ember_engine::paint::Color;
use mlua::{Lua, Table, Value};

use crate::capability;
use crate::context::SharedContext;
use crate::error::ScriptError;

const DEFAULT_MODULE_DIR: &str = "./scripts";

/// One embedded Lua interpreter.
///
/// Dropping a `Script` closes the interpreter and releases every guest value
/// and module it holds.
pub struct Script {
    lua: Lua,
}

impl Script {
    /// Creates an interpreter that resolves `require` from `./scripts`.
    pub fn new() -> Result<Self, ScriptError> {
        Self::with_module_dir(Path::new(DEFAULT_MODULE_DIR))
    }

    /// Creates an interpreter whose `package.path` starts with `<dir>/?.lua`.
    pub fn with_module_dir(dir: &Path) -> Result<Self, ScriptError> {
        let lua = Lua::new();

        let package: Table = lua.globals().get("package")?;
        let current: String = package.get("path")?;
        let pattern = dir.join("?.lua");
        package.set("path", format!("{};{current}", pattern.display()))?;

        Ok(Self { lua })
    }

    /// Makes the `core.*` modules available to `require`.
    ///
    /// A module already present in `package.loaded` is left alone, so calling
    /// this more than once changes nothing.
    pub fn register_capabilities(&self, ctx: &SharedContext) -> Result<(), ScriptError> {
        capability::register_all(&self.lua, ctx)?;
        Ok(())
    }

    /// Reads `path` and runs it in the global scope.
    pub fn load(&self, path: &Path) -> Result<(), ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_source(&path.display().to_string(), &source)
    }

    /// Runs an in-memory chunk in the global scope.
    pub fn load_source(&self, name: &str, source: &str) -> Result<(), ScriptError> {
        log::debug!("loading script {name}");
        self.lua
            .load(source)
            .set_name(format!("@{name}"))
            .exec()
            .map_err(|e| ScriptError::Load {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Global `name` as text. Numbers are converted; anything else reads as `""`.
    pub fn get_string(&self, name: &str) -> String {
        let value = self.global(name);
        if !matches!(value, Value::String(_) | Value::Integer(_) | Value::Number(_)) {
            return String::new();
        }
        match self.lua.coerce_string(value) {
            Ok(Some(s)) => s.to_string_lossy(),
            _ => String::new(),
        }
    }

    /// Global `name` when it holds an integer, else `0`.
    pub fn get_integer(&self, name: &str) -> i64 {
        match self.global(name) {
            Value::Integer(i) => i,
            _ => 0,
        }
    }

    /// Global `name` when it holds a boolean, else `default`.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        match self.global(name) {
            Value::Boolean(b) => b,
            _ => default,
        }
    }

    /// Global `name` read as an `{ r, g, b }` table.
    ///
    /// Missing or non-integer channels read as `0`; values clamp to `0..=255`.
    /// Anything other than a table yields black.
    pub fn get_color(&self, name: &str) -> Color {
        match self.global(name) {
            Value::Table(t) => color_from_table(&t),
            _ => Color::BLACK,
        }
    }

    pub(crate) fn lua(&self) -> &Lua {
        &self.lua
    }

    fn global(&self, name: &str) -> Value {
        self.lua.globals().get::<Value>(name).unwrap_or(Value::Nil)
    }
}

/// Reads integer `r`, `g`, `b` fields; alpha is always opaque.
pub(crate) fn color_from_table(t: &Table) -> Color {
    let channel = |key: &str| -> u8 {
        let v = match t.get::<Value>(key) {
            Ok(Value::Integer(i)) => i,
            Ok(Value::Number(n)) if n.fract() == 0.0 && n.is_finite() => n as i64,
            _ => 0,
        };
        v.clamp(0, 255) as u8
    };
    Color::from_rgb8(channel("r"), channel("g"), channel("b"))
}
