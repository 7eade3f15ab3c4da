use std::cell::RefCell;
use std::rc::Rc;

use ember_engine::audio::AudioDevice;
use ember_engine::scene::DrawList;
use ember_engine::sprite::{SpriteFilter, SpriteStore};
use ember_engine::text::FontSystem;

/// Everything the native capability modules act on.
///
/// Scripts only record draw commands and load CPU-side assets here; the
/// stage turns the recorded frame into pixels at present time.
pub struct HostContext {
    pub draw_list: DrawList,
    pub sprites: SpriteStore,
    pub fonts: FontSystem,
    pub audio: Box<dyn AudioDevice>,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Handle shared between capability closures and the frame driver.
pub type SharedContext = Rc<RefCell<HostContext>>;

impl HostContext {
    pub fn new(audio: Box<dyn AudioDevice>, filter: SpriteFilter) -> Self {
        Self {
            draw_list: DrawList::new(),
            sprites: SpriteStore::new(filter),
            fonts: FontSystem::new(),
            audio,
            screen_width: 0,
            screen_height: 0,
        }
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn into_shared(self) -> SharedContext {
        Rc::new(RefCell::new(self))
    }
}
