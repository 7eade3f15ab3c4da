//! `core.sound`: effects mix freely, music owns a single track.

use std::path::Path;
use std::rc::Rc;

use mlua::{Lua, Table, Value, Variadic};

use crate::context::SharedContext;

use super::args::Args;
use super::handles::{MusicHandle, SfxHandle};
use super::host;

pub(crate) fn module(lua: &Lua, ctx: &SharedContext) -> mlua::Result<Table> {
    let m = lua.create_table()?;

    let c = Rc::clone(ctx);
    m.set(
        "load_sfx",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let path = Args::new("load_sfx", &rest).string(1)?;
            match host(&c)?.audio.load(Path::new(&path)) {
                Ok(id) => {
                    log::info!("loaded sound effect {path}");
                    Ok(Some(SfxHandle(id)))
                }
                Err(e) => {
                    log::warn!("load_sfx: {e}");
                    Ok(None)
                }
            }
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "load_music",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let path = Args::new("load_music", &rest).string(1)?;
            match host(&c)?.audio.load(Path::new(&path)) {
                Ok(id) => {
                    log::info!("loaded music {path}");
                    Ok(Some(MusicHandle(id)))
                }
                Err(e) => {
                    log::warn!("load_music: {e}");
                    Ok(None)
                }
            }
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "play_sfx",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("play_sfx", &rest);
            let sfx: SfxHandle = args.native(1)?;
            let looped = args.flag_or(2, false);
            if let Err(e) = host(&c)?.audio.play_effect(sfx.0, looped) {
                log::warn!("play_sfx: {e}");
            }
            Ok(())
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "play_music",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("play_music", &rest);
            let music: MusicHandle = args.native(1)?;
            let looped = args.flag_or(2, false);
            if let Err(e) = host(&c)?.audio.play_music(music.0, looped) {
                log::warn!("play_music: {e}");
            }
            Ok(())
        })?,
    )?;

    Ok(m)
}
