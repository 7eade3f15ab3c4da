use std::path::Path;

use ember_engine::paint::Color;
use ember_engine::sprite::SpriteFilter;

use crate::error::ScriptError;
use crate::host::Script;

const FALLBACK_TITLE: &str = "ember";
const FALLBACK_SIZE: (u32, u32) = (1280, 720);

/// Window and render options declared as globals in a settings script.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub show_cursor: bool,
    /// Linear rather than nearest sampling for scaled sprites.
    pub quality_linear: bool,
    /// Borderless fullscreen.
    pub full_screen: bool,
    /// Keep the pointer inside the window.
    pub mouse_grab: bool,
    pub background: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: FALLBACK_TITLE.to_string(),
            screen_width: FALLBACK_SIZE.0,
            screen_height: FALLBACK_SIZE.1,
            show_cursor: true,
            quality_linear: false,
            full_screen: false,
            mouse_grab: false,
            background: Color::BLACK,
        }
    }
}

impl Settings {
    /// Runs `path` in a fresh interpreter with no capabilities and reads the
    /// settings globals from it. The interpreter is dropped afterwards.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let script = Script::new()?;
        script.load(path)?;
        Ok(Self::from_script(&script))
    }

    pub fn from_script(script: &Script) -> Self {
        let mut title = script.get_string("title");
        if title.is_empty() {
            title = FALLBACK_TITLE.to_string();
        }

        let (w, h) = (script.get_integer("screen_width"), script.get_integer("screen_height"));
        let (screen_width, screen_height) = match (u32::try_from(w), u32::try_from(h)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                log::warn!(
                    "invalid screen size {w}x{h}; using {}x{}",
                    FALLBACK_SIZE.0,
                    FALLBACK_SIZE.1
                );
                FALLBACK_SIZE
            }
        };

        Self {
            title,
            screen_width,
            screen_height,
            show_cursor: script.get_bool("show_cursor", true),
            quality_linear: script.get_bool("quality_linear", false),
            full_screen: script.get_bool("full_screen", false),
            mouse_grab: script.get_bool("mouse_grab", false),
            background: script.get_color("background"),
        }
    }

    pub fn sprite_filter(&self) -> SpriteFilter {
        if self.quality_linear { SpriteFilter::Linear } else { SpriteFilter::Nearest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(src: &str) -> Settings {
        let s = Script::new().unwrap();
        s.load_source("settings", src).unwrap();
        Settings::from_script(&s)
    }

    #[test]
    fn reads_every_field() {
        let s = settings(
            "title = 'Breakout'
             screen_width = 800
             screen_height = 600
             show_cursor = false
             quality_linear = true
             full_screen = true
             mouse_grab = true
             background = { r = 10, g = 20, b = 30 }",
        );
        assert_eq!(
            s,
            Settings {
                title: "Breakout".into(),
                screen_width: 800,
                screen_height: 600,
                show_cursor: false,
                quality_linear: true,
                full_screen: true,
                mouse_grab: true,
                background: Color::from_rgb8(10, 20, 30),
            }
        );
        assert_eq!(s.sprite_filter(), SpriteFilter::Linear);
    }

    #[test]
    fn empty_script_gives_defaults() {
        assert_eq!(settings(""), Settings::default());
    }

    #[test]
    fn non_positive_size_falls_back() {
        let s = settings("screen_width = 0; screen_height = 600");
        assert_eq!((s.screen_width, s.screen_height), (1280, 720));
        let s = settings("screen_width = -5; screen_height = -5");
        assert_eq!((s.screen_width, s.screen_height), (1280, 720));
    }

    #[test]
    fn load_reads_file_and_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("settings.lua");
        std::fs::write(&good, "title = 'From disk'").unwrap();
        assert_eq!(Settings::load(&good).unwrap().title, "From disk");

        let bad = dir.path().join("bad.lua");
        std::fs::write(&bad, "title = ").unwrap();
        assert!(matches!(Settings::load(&bad), Err(ScriptError::Load { .. })));
    }

    #[test]
    fn settings_script_has_no_capabilities() {
        let s = Script::new().unwrap();
        let err = s.load_source("settings", "require('core.draw')").unwrap_err();
        assert!(matches!(err, ScriptError::Load { .. }));
    }
}
