//! `core.draw` and `core.screen`.

use std::path::Path;
use std::rc::Rc;

use ember_engine::coords::{Rect, Vector};
use ember_engine::paint::Color;
use ember_engine::scene::SpriteCmd;
use mlua::{Lua, Table, Value, Variadic};

use crate::context::{HostContext, SharedContext};

use super::args::Args;
use super::geometry::{BoxedRect, BoxedVector};
use super::handles::{FontHandle, SpriteHandle, SpriteSetHandle};
use super::host;

pub(crate) fn module(lua: &Lua, ctx: &SharedContext) -> mlua::Result<Table> {
    let m = lua.create_table()?;

    let c = Rc::clone(ctx);
    m.set(
        "load_sprite_set",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("load_sprite_set", &rest);
            let path = args.string(1)?;
            let cell_w = u32::try_from(args.integer(2)?).unwrap_or(0);
            let cell_h = u32::try_from(args.integer(3)?).unwrap_or(0);

            match host(&c)?.sprites.load(Path::new(&path), cell_w, cell_h) {
                Ok(id) => Ok(Some(SpriteSetHandle(id))),
                Err(e) => {
                    log::warn!("load_sprite_set: {e}");
                    Ok(None)
                }
            }
        })?,
    )?;

    m.set(
        "new_sprite",
        lua.create_function(|_, rest: Variadic<Value>| {
            let args = Args::new("new_sprite", &rest);
            let set: SpriteSetHandle = args.native(1)?;
            read_sprite(set, &args, 2)
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "draw_sprite",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("draw_sprite", &rest);
            let sprite: SpriteHandle = args.native(1)?;
            let position: BoxedVector = args.native(2)?;
            push_sprite(&mut *host(&c)?, sprite, position.0)
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "draw_sprite_set",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("draw_sprite_set", &rest);
            let set: SpriteSetHandle = args.native(1)?;
            let position: BoxedVector = args.native(2)?;
            let sprite = read_sprite(set, &args, 3)?;
            push_sprite(&mut *host(&c)?, sprite, position.0)
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "draw_text",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("draw_text", &rest);
            let font: FontHandle = args.native(1)?;
            let text = args.string(2)?;
            let position: BoxedVector = args.native(3)?;
            let fg = args.color_or(4, Color::WHITE)?;
            let shaded = args.flag_or(5, false);
            let bg = args.color_or(6, Color::BLACK)?;

            let mut host = host(&c)?;
            if shaded {
                let (w, h) = host.fonts.measure_text(&text, font.id, font.size);
                let backing = Rect::from_position_dimension(position.0, Vector::new(w as f64, h as f64));
                host.draw_list.push_fill_rect(backing, bg);
            }
            host.draw_list.push_text(text, font.id, font.size, fg, position.0);
            Ok(())
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "draw_rect",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("draw_rect", &rest);
            let rect: BoxedRect = args.native(1)?;
            let color = args.color(2)?;
            host(&c)?.draw_list.push_outline_rect(rect.0, color);
            Ok(())
        })?,
    )?;

    let c = Rc::clone(ctx);
    m.set(
        "draw_fill_rect",
        lua.create_function(move |_, rest: Variadic<Value>| {
            let args = Args::new("draw_fill_rect", &rest);
            let rect: BoxedRect = args.native(1)?;
            let color = args.color(2)?;
            host(&c)?.draw_list.push_fill_rect(rect.0, color);
            Ok(())
        })?,
    )?;

    Ok(m)
}

/// `{ width, height }` as the screen was when the module was registered.
pub(crate) fn screen_module(lua: &Lua, ctx: &SharedContext) -> mlua::Result<Table> {
    let host = host(ctx)?;
    let m = lua.create_table()?;
    m.set("width", host.screen_width)?;
    m.set("height", host.screen_height)?;
    Ok(m)
}

/// Reads `col, row, scale, flip_h, flip_v` starting at position `first`.
fn read_sprite(set: SpriteSetHandle, args: &Args<'_>, first: usize) -> mlua::Result<SpriteHandle> {
    Ok(SpriteHandle {
        set: set.0,
        col: args.integer_or(first, 0)?,
        row: args.integer_or(first + 1, 0)?,
        scale: args.number_or(first + 2, 1.0)?,
        flip_h: args.flag_or(first + 3, false),
        flip_v: args.flag_or(first + 4, false),
    })
}

fn push_sprite(host: &mut HostContext, sprite: SpriteHandle, position: Vector) -> mlua::Result<()> {
    let Some(sheet) = host.sprites.get(sprite.set) else {
        return Err(mlua::Error::RuntimeError("sprite set is not loaded in this host".into()));
    };

    let src = sheet.cell_rect(sprite.col, sprite.row);
    let dst = Rect::from_position_dimension(position, src.dimension * sprite.scale);
    host.draw_list.push_sprite(SpriteCmd {
        sheet: sprite.set,
        src,
        dst,
        flip_h: sprite.flip_h,
        flip_v: sprite.flip_v,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use ember_engine::coords::Rect;
    use ember_engine::paint::Color;
    use ember_engine::scene::DrawCmd;

    use crate::testing::{catch, game_script, headless_context, lua_path, run, system_font, write_png};

    const PRELUDE: &str = "
        draw = require('core.draw')
        Vector = require('core.vector')
        Rect = require('core.rect')
    ";

    // ── sprites ───────────────────────────────────────────────────────────

    #[test]
    fn sprite_source_and_destination_follow_cell_and_scale() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "hero.png", 64, 32);
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);

        run(
            &s,
            &format!(
                "set = draw.load_sprite_set('{}', 16, 16)
                 hero = draw.new_sprite(set, 2, 1, 2.0, true)
                 draw.draw_sprite(hero, Vector.new(10, 20))",
                lua_path(&png)
            ),
        );

        let host = ctx.borrow();
        let [DrawCmd::Sprite(cmd)] = host.draw_list.items() else {
            panic!("expected one sprite, got {:?}", host.draw_list.items());
        };
        assert_eq!(cmd.src, Rect::new(32.0, 16.0, 16.0, 16.0));
        assert_eq!(cmd.dst, Rect::new(10.0, 20.0, 32.0, 32.0));
        assert!(cmd.flip_h);
        assert!(!cmd.flip_v);
    }

    #[test]
    fn draw_sprite_set_defaults_trailing_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "tiles.png", 32, 32);
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);

        run(
            &s,
            &format!(
                "set = draw.load_sprite_set('{}', 8, 8)
                 draw.draw_sprite_set(set, Vector.new(0, 0))
                 draw.draw_sprite_set(set, Vector.new(0, 0), 1, nil, 3)",
                lua_path(&png)
            ),
        );

        let host = ctx.borrow();
        let sprites: Vec<_> = host
            .draw_list
            .items()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Sprite(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].src, Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(sprites[0].dst, Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(sprites[1].src, Rect::new(8.0, 0.0, 8.0, 8.0));
        assert_eq!(sprites[1].dst, Rect::new(0.0, 0.0, 24.0, 24.0));
    }

    #[test]
    fn failed_sprite_load_returns_nil() {
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        run(&s, "missing = draw.load_sprite_set('/no/such/sheet.png', 16, 16) == nil");
        assert!(s.get_bool("missing", false));
        assert!(ctx.borrow().sprites.is_empty());
    }

    #[test]
    fn new_sprite_rejects_non_atlas() {
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        let msg = catch(&s, "draw.new_sprite(Vector.new(0, 0))").unwrap();
        assert!(msg.contains("SpriteSet expected, got Vector"), "{msg}");
        let msg = catch(&s, "draw.new_sprite()").unwrap();
        assert!(msg.contains("got no value"), "{msg}");
    }

    // ── rects ─────────────────────────────────────────────────────────────

    #[test]
    fn rects_record_outline_and_fill() {
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        run(
            &s,
            "draw.draw_rect(Rect.new(1, 2, 3, 4), { r = 255, g = 0, b = 0 })
             draw.draw_fill_rect(Rect.new(5, 6, 7, 8), { r = 0, g = 255, b = 0 })",
        );

        let host = ctx.borrow();
        let [DrawCmd::Rect(outline), DrawCmd::Rect(fill)] = host.draw_list.items() else {
            panic!("expected two rects");
        };
        assert!(!outline.filled);
        assert_eq!(outline.rect, Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(outline.color, Color::from_rgb8(255, 0, 0));
        assert!(fill.filled);
        assert_eq!(fill.color, Color::from_rgb8(0, 255, 0));
    }

    #[test]
    fn draw_rect_requires_color_table() {
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        let msg = catch(&s, "draw.draw_rect(Rect.new(0, 0, 1, 1), 'red')").unwrap();
        assert!(msg.contains("bad argument #2 to 'draw_rect'"), "{msg}");
        assert!(ctx.borrow().draw_list.is_empty());
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn shaded_text_records_backing_rect_first() {
        let Some(font) = system_font() else { return };
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        run(
            &s,
            &format!(
                "f = require('core.font').load('{}', 16)
                 draw.draw_text(f, 'Score', Vector.new(4, 4), nil, true, {{ r = 0, g = 0, b = 255 }})",
                lua_path(&font)
            ),
        );

        let host = ctx.borrow();
        let [DrawCmd::Rect(bg), DrawCmd::Text(text)] = host.draw_list.items() else {
            panic!("expected backing rect then text");
        };
        assert!(bg.filled);
        assert_eq!(bg.color, Color::from_rgb8(0, 0, 255));
        assert_eq!(bg.rect.position, text.origin);
        assert!(bg.rect.w() > 0.0);
        assert_eq!(text.text, "Score");
        assert_eq!(text.color, Color::WHITE);
        assert_eq!(text.size, 16.0);
    }

    #[test]
    fn draw_text_requires_font() {
        let ctx = headless_context();
        let s = game_script(&ctx, PRELUDE);
        let msg = catch(&s, "draw.draw_text(nil, 'hi', Vector.new(0, 0))").unwrap();
        assert!(msg.contains("Font expected, got no value"), "{msg}");
    }

    // ── screen ────────────────────────────────────────────────────────────

    #[test]
    fn screen_reports_host_size() {
        let ctx = headless_context();
        let s = game_script(&ctx, "screen = require('core.screen'); w = screen.width; h = screen.height");
        assert_eq!(s.get_integer("w"), 640);
        assert_eq!(s.get_integer("h"), 480);
    }
}
