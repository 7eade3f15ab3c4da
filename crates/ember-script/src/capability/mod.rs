//! Native modules exposed to scripts through `require("core.*")`.
//!
//! Every function reads its arguments through [`args::Args`], so defaults
//! and `bad argument` errors behave the same across modules. Functions that
//! touch the host borrow the shared context only for the duration of the
//! call.

mod args;
mod draw;
mod font;
mod geometry;
mod handles;
mod sound;

use std::cell::RefMut;

use mlua::{AnyUserData, Lua, Table, Value};

use crate::context::{HostContext, SharedContext};

use self::args::NativeType;
use self::geometry::{BoxedRect, BoxedVector};
use self::handles::{FontHandle, MusicHandle, SfxHandle, SpriteHandle, SpriteSetHandle};

type ModuleBuilder = fn(&Lua, &SharedContext) -> mlua::Result<Table>;

const MODULES: [(&str, ModuleBuilder); 6] = [
    ("core.draw", draw::module),
    ("core.screen", draw::screen_module),
    ("core.sound", sound::module),
    ("core.font", font::module),
    ("core.vector", geometry::vector_module),
    ("core.rect", geometry::rect_module),
];

/// Stores each module in `package.loaded` unless something is already there.
pub(crate) fn register_all(lua: &Lua, ctx: &SharedContext) -> mlua::Result<()> {
    let loaded: Table = lua.globals().get::<Table>("package")?.get("loaded")?;

    for (name, build) in MODULES {
        if !loaded.get::<Value>(name)?.is_nil() {
            continue;
        }
        loaded.set(name, build(lua, ctx)?)?;
        log::debug!("registered module {name}");
    }
    Ok(())
}

/// Mutable access to the host for the duration of one native call.
pub(crate) fn host(ctx: &SharedContext) -> mlua::Result<RefMut<'_, HostContext>> {
    ctx.try_borrow_mut()
        .map_err(|_| mlua::Error::RuntimeError("host context is already in use".into()))
}

pub(crate) fn userdata_name(ud: &AnyUserData) -> &'static str {
    fn named<T: NativeType>(ud: &AnyUserData) -> Option<&'static str> {
        ud.is::<T>().then_some(T::NAME)
    }

    named::<BoxedVector>(ud)
        .or_else(|| named::<BoxedRect>(ud))
        .or_else(|| named::<SpriteSetHandle>(ud))
        .or_else(|| named::<SpriteHandle>(ud))
        .or_else(|| named::<SfxHandle>(ud))
        .or_else(|| named::<MusicHandle>(ud))
        .or_else(|| named::<FontHandle>(ud))
        .unwrap_or("userdata")
}
