//! `core.font`.

use std::path::Path;
use std::rc::Rc;

use mlua::{Lua, Table, Value, Variadic};

use crate::context::SharedContext;

use super::args::Args;
use super::handles::FontHandle;
use super::host;

pub(crate) fn module(lua: &Lua, ctx: &SharedContext) -> mlua::Result<Table> {
    let m = lua.create_table()?;

    let c = Rc::clone(ctx);
    m.set(
        "load",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("load", &rest);
            let path = args.string(1)?;
            // Points at 72 dpi, so one point is one pixel.
            let size = args.integer(2)?;
            if size <= 0 {
                log::warn!("font.load: size {size} for {path} is not positive");
                return Ok(None);
            }
            let size = size as f32;

            match host(&c)?.fonts.load_file(Path::new(&path)) {
                Ok(id) => Ok(Some(FontHandle { id, size })),
                Err(e) => {
                    log::warn!("font.load: {e}");
                    Ok(None)
                }
            }
        })?,
    )?;

    Ok(m)
}
