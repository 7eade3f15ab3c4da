//! Shared fixtures for script-level tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ember_engine::audio::{AudioDevice, AudioError, SoundId};
use ember_engine::sprite::SpriteFilter;

use crate::{HostContext, Script, SharedContext};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AudioCall {
    Effect { id: SoundId, looped: bool },
    Music { id: SoundId, looped: bool },
}

/// Audio device that accepts any existing file and records every play call.
#[derive(Debug, Default)]
pub(crate) struct RecordingAudio {
    pub loaded: Vec<PathBuf>,
    pub calls: Rc<RefCell<Vec<AudioCall>>>,
}

impl AudioDevice for RecordingAudio {
    fn load(&mut self, path: &Path) -> Result<SoundId, AudioError> {
        if !path.exists() {
            return Err(AudioError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.loaded.push(path.to_path_buf());
        Ok(SoundId(self.loaded.len() - 1))
    }

    fn play_effect(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError> {
        self.calls.borrow_mut().push(AudioCall::Effect { id, looped });
        Ok(())
    }

    fn play_music(&mut self, id: SoundId, looped: bool) -> Result<(), AudioError> {
        self.calls.borrow_mut().push(AudioCall::Music { id, looped });
        Ok(())
    }
}

pub(crate) fn headless_context() -> SharedContext {
    let mut host = HostContext::new(Box::new(RecordingAudio::default()), SpriteFilter::Nearest);
    host.set_screen_size(640, 480);
    host.into_shared()
}

/// Context whose audio calls can be inspected through the returned log.
pub(crate) fn recording_context() -> (SharedContext, Rc<RefCell<Vec<AudioCall>>>) {
    let audio = RecordingAudio::default();
    let calls = Rc::clone(&audio.calls);
    let mut host = HostContext::new(Box::new(audio), SpriteFilter::Nearest);
    host.set_screen_size(640, 480);
    (host.into_shared(), calls)
}

/// Script with all capabilities registered against `ctx`.
pub(crate) fn game_script(ctx: &SharedContext, src: &str) -> Script {
    let s = Script::new().unwrap();
    s.register_capabilities(ctx).unwrap();
    s.load_source("game", src).unwrap();
    s
}

pub(crate) fn run(s: &Script, src: &str) {
    s.load_source("chunk", src).unwrap();
}

/// Runs `body` under `pcall`; returns the error text if it raised.
pub(crate) fn catch(s: &Script, body: &str) -> Option<String> {
    run(
        s,
        &format!(
            "do
               local ok, err = pcall(function() {body} end)
               __caught = (not ok) and tostring(err) or nil
             end"
        ),
    );
    let msg = s.get_string("__caught");
    (!msg.is_empty()).then_some(msg)
}

/// Writes a `w` x `h` opaque PNG into `dir` and returns its path.
pub(crate) fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255]))
        .save(&path)
        .unwrap();
    path
}

/// A TrueType face from the usual system locations, if one is installed.
///
/// Tests that rasterize or measure text return early without one.
pub(crate) fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}

/// Escapes a path for use inside a single-quoted Lua string.
pub(crate) fn lua_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\").replace('\'', "\\'")
}
