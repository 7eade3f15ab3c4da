//! Opaque handles handed to scripts.
//!
//! None of these expose fields or methods to Lua; a script can only pass
//! them back into the module that created them. Each carries an id into a
//! registry owned by the host context.

use ember_engine::audio::SoundId;
use ember_engine::sprite::SpriteSheetId;
use ember_engine::text::FontId;
use mlua::UserData;

use super::args::NativeType;

#[derive(Debug, Copy, Clone)]
pub(crate) struct SpriteSetHandle(pub SpriteSheetId);

/// A sheet cell plus how to draw it, composed by value.
#[derive(Debug, Copy, Clone)]
pub(crate) struct SpriteHandle {
    pub set: SpriteSheetId,
    pub col: i64,
    pub row: i64,
    pub scale: f64,
    pub flip_h: bool,
    pub flip_v: bool,
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct SfxHandle(pub SoundId);

#[derive(Debug, Copy, Clone)]
pub(crate) struct MusicHandle(pub SoundId);

/// A parsed face at the size it was loaded with.
#[derive(Debug, Copy, Clone)]
pub(crate) struct FontHandle {
    pub id: FontId,
    pub size: f32,
}

impl UserData for SpriteSetHandle {}
impl UserData for SpriteHandle {}
impl UserData for SfxHandle {}
impl UserData for MusicHandle {}
impl UserData for FontHandle {}

impl NativeType for SpriteSetHandle {
    const NAME: &'static str = "SpriteSet";
}

impl NativeType for SpriteHandle {
    const NAME: &'static str = "Sprite";
}

impl NativeType for SfxHandle {
    const NAME: &'static str = "SoundEffect";
}

impl NativeType for MusicHandle {
    const NAME: &'static str = "SoundMusic";
}

impl NativeType for FontHandle {
    const NAME: &'static str = "Font";
}
