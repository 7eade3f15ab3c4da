use std::time::Instant;

use ember_engine::input::{InputEvent, InputState, Key, KeyState, MouseButtonState};
use ember_engine::paint::Color;
use ember_engine::time::FrameClock;

use crate::context::{HostContext, SharedContext};
use crate::error::{DispatchError, FrameError};
use crate::level::Level;

/// Run state of the game loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameState {
    Running,
    Paused,
    /// Terminal.
    Quit,
}

/// Turns a recorded frame into pixels.
pub trait Stage {
    /// Clears to `background` and draws everything in `host.draw_list`.
    fn present(&mut self, background: Color, host: &mut HostContext) -> anyhow::Result<()>;
}

/// Paces a [`Level`]: routes input while running, and runs
/// update, draw and present once per frame.
///
/// Escape and window close quit from any state. F5 toggles pause and is then
/// forwarded as an ordinary key press if the game resumed. Everything else is
/// swallowed while paused, and the clock baseline keeps moving so the first
/// `dt` after resuming does not include the pause.
pub struct FrameDriver {
    level: Level,
    host: SharedContext,
    background: Color,
    state: GameState,
    clock: FrameClock,
    input: InputState,
}

impl FrameDriver {
    pub fn new(level: Level, host: SharedContext, background: Color) -> Self {
        Self {
            level,
            host,
            background,
            state: GameState::Running,
            clock: FrameClock::default(),
            input: InputState::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_quit(&self) -> bool {
        self.state == GameState::Quit
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Runs `_load` and starts timing from `now`.
    pub fn start(&mut self, now: Instant) -> Result<(), DispatchError> {
        self.level.load()?;
        self.clock.reset_at(now);
        Ok(())
    }

    /// Handles one input event in delivery order.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<(), DispatchError> {
        if self.state == GameState::Quit {
            return Ok(());
        }
        self.input.apply_event(event);

        match *event {
            InputEvent::CloseRequested
            | InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } => {
                log::info!("quit requested");
                self.state = GameState::Quit;
                return Ok(());
            }
            InputEvent::Key { key: Key::F5, state: KeyState::Pressed, repeat: false } => {
                self.toggle_pause();
            }
            _ => {}
        }

        if self.state != GameState::Running {
            return Ok(());
        }

        match *event {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => self.level.keydown(key.name()),
            InputEvent::Key { key, state: KeyState::Released, .. } => self.level.keyup(key.name()),
            InputEvent::PointerButton(b) => {
                let (x, y) = (b.x as i64, b.y as i64);
                match b.state {
                    MouseButtonState::Pressed => {
                        self.level.mousedown(b.button.name(), b.state.name(), x, y)
                    }
                    MouseButtonState::Released => {
                        self.level.mouseup(b.button.name(), b.state.name(), x, y)
                    }
                }
            }
            InputEvent::PointerMoved(m) => {
                let held = if self.input.any_button_down() {
                    MouseButtonState::Pressed
                } else {
                    MouseButtonState::Released
                };
                self.level.mousemove(
                    held.name(),
                    m.x as i64,
                    m.y as i64,
                    m.dx.round() as i64,
                    m.dy.round() as i64,
                )
            }
            _ => Ok(()),
        }
    }

    /// Advances one frame. Does nothing once quit.
    pub fn run_frame(&mut self, now: Instant, stage: &mut dyn Stage) -> Result<(), FrameError> {
        match self.state {
            GameState::Quit => return Ok(()),
            GameState::Paused => {
                self.clock.reset_at(now);
                return Ok(());
            }
            GameState::Running => {}
        }

        let dt = self.clock.tick_at(now).dt;
        self.level.update(dt)?;

        self.host.borrow_mut().draw_list.clear();
        self.level.draw()?;

        let mut host = self.host.borrow_mut();
        stage.present(self.background, &mut host).map_err(FrameError::Present)
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Running => GameState::Paused,
            GameState::Paused => GameState::Running,
            GameState::Quit => GameState::Quit,
        };
        log::info!("game {:?}", self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ember_engine::input::{MouseButton, PointerButtonEvent, PointerMoveEvent};
    use ember_engine::scene::DrawCmd;

    use super::*;
    use crate::host::Script;
    use crate::testing::{game_script, headless_context};

    /// Records each presented frame's background and command count.
    #[derive(Default)]
    struct RecordingStage {
        frames: Vec<(Color, usize)>,
        fail: bool,
    }

    impl Stage for RecordingStage {
        fn present(&mut self, background: Color, host: &mut HostContext) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("surface gone");
            }
            self.frames.push((background, host.draw_list.len()));
            Ok(())
        }
    }

    const GAME: &str = "
        draw = require('core.draw')
        Rect = require('core.rect')
        events = {}
        function log(s) events[#events + 1] = s end
        function _load() log('load') end
        function _update(dt) total = (total or 0) + dt; n = (n or 0) + 1; log('update') end
        function _draw()
            log('draw:' .. n)
            draw.draw_fill_rect(Rect.new(0, 0, 4, 4), { r = 1, g = 2, b = 3 })
        end
        function _keydown(k) log('down:' .. k) end
        function _keyup(k) log('up:' .. k) end
        function _mousedown(b, s, x, y) log('mdown:' .. b .. ':' .. s .. ':' .. x .. ',' .. y) end
        function _mouseup(b, s, x, y) log('mup:' .. b .. ':' .. s) end
        function _mousemove(s, x, y, rx, ry) log('move:' .. s .. ':' .. rx .. ',' .. ry) end
    ";

    fn driver(src: &str) -> FrameDriver {
        let ctx = headless_context();
        let level = Level::new(game_script(&ctx, src));
        FrameDriver::new(level, ctx, Color::from_rgb8(10, 20, 30))
    }

    fn events(d: &FrameDriver) -> String {
        d.level().script().load_source("dump", "dump = table.concat(events, ' ')").unwrap();
        d.level().script().get_string("dump")
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    fn press(k: Key) -> InputEvent {
        key(k, KeyState::Pressed)
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frame_runs_update_draw_present() {
        let mut d = driver(GAME);
        let t0 = Instant::now();
        d.start(t0).unwrap();

        let mut stage = RecordingStage::default();
        d.run_frame(t0 + Duration::from_millis(16), &mut stage).unwrap();
        d.run_frame(t0 + Duration::from_millis(32), &mut stage).unwrap();

        // Each draw sees the count its own update just wrote.
        assert_eq!(events(&d), "load update draw:1 update draw:2");
        // The draw list is cleared between frames.
        assert_eq!(stage.frames, vec![(Color::from_rgb8(10, 20, 30), 1); 2]);
        let host = d.host.borrow();
        assert!(matches!(host.draw_list.items(), [DrawCmd::Rect(_)]));
    }

    #[test]
    fn dt_comes_from_the_clock() {
        let mut d = driver(GAME);
        let t0 = Instant::now();
        d.start(t0).unwrap();
        let mut stage = RecordingStage::default();
        d.run_frame(t0 + Duration::from_millis(250), &mut stage).unwrap();
        assert_eq!(d.level().script().get_string("total"), "0.25");
    }

    #[test]
    fn pause_skips_frames_and_discards_elapsed_time() {
        let mut d = driver(GAME);
        let t0 = Instant::now();
        d.start(t0).unwrap();
        let mut stage = RecordingStage::default();

        d.handle_input(&press(Key::F5)).unwrap();
        assert_eq!(d.state(), GameState::Paused);
        d.run_frame(t0 + Duration::from_secs(5), &mut stage).unwrap();
        assert!(stage.frames.is_empty());

        d.handle_input(&press(Key::F5)).unwrap();
        assert_eq!(d.state(), GameState::Running);
        d.run_frame(t0 + Duration::from_millis(5100), &mut stage).unwrap();

        let total: f64 = d.level().script().get_string("total").parse().unwrap();
        assert!((total - 0.1).abs() < 1e-9, "{total}");
        assert_eq!(stage.frames.len(), 1);
    }

    #[test]
    fn present_failure_is_frame_error() {
        let mut d = driver(GAME);
        d.start(Instant::now()).unwrap();
        let mut stage = RecordingStage { fail: true, ..Default::default() };
        let err = d.run_frame(Instant::now(), &mut stage).unwrap_err();
        assert!(matches!(err, FrameError::Present(_)));
    }

    #[test]
    fn missing_draw_stops_the_frame() {
        let mut d = driver("function _load() end function _update() end");
        d.start(Instant::now()).unwrap();
        let mut stage = RecordingStage::default();
        let err = d.run_frame(Instant::now(), &mut stage).unwrap_err();
        assert!(matches!(err, FrameError::Dispatch(DispatchError::MissingHook { hook: "_draw" })));
        assert!(stage.frames.is_empty());
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn escape_and_close_quit() {
        let mut d = driver(GAME);
        d.handle_input(&press(Key::Escape)).unwrap();
        assert!(d.is_quit());
        // Terminal: F5 cannot leave Quit.
        d.handle_input(&press(Key::F5)).unwrap();
        assert!(d.is_quit());

        let mut d = driver(GAME);
        d.handle_input(&press(Key::F5)).unwrap();
        d.handle_input(&InputEvent::CloseRequested).unwrap();
        assert!(d.is_quit());
    }

    #[test]
    fn f5_is_forwarded_only_when_resuming() {
        let mut d = driver(GAME);
        d.start(Instant::now()).unwrap();
        d.handle_input(&press(Key::F5)).unwrap();
        d.handle_input(&press(Key::A)).unwrap();
        d.handle_input(&press(Key::F5)).unwrap();
        d.handle_input(&key(Key::F5, KeyState::Released)).unwrap();
        assert_eq!(events(&d), "load down:F5 up:F5");
    }

    #[test]
    fn keys_dispatch_by_name() {
        let mut d = driver(GAME);
        d.start(Instant::now()).unwrap();
        d.handle_input(&press(Key::Space)).unwrap();
        d.handle_input(&key(Key::ArrowLeft, KeyState::Released)).unwrap();
        d.handle_input(&InputEvent::Key { key: Key::Enter, state: KeyState::Pressed, repeat: true })
            .unwrap();
        assert_eq!(events(&d), "load down:Space up:Left down:Return");
    }

    #[test]
    fn mouse_events_carry_button_state_and_motion() {
        let mut d = driver(GAME);
        d.start(Instant::now()).unwrap();

        let button = |state| {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Right,
                state,
                x: 12.7,
                y: 30.0,
            })
        };
        let moved = InputEvent::PointerMoved(PointerMoveEvent { x: 15.0, y: 31.0, dx: 3.0, dy: 1.0 });

        d.handle_input(&moved).unwrap();
        d.handle_input(&button(MouseButtonState::Pressed)).unwrap();
        d.handle_input(&moved).unwrap();
        d.handle_input(&button(MouseButtonState::Released)).unwrap();

        assert_eq!(
            events(&d),
            "load move:Released:3,1 mdown:Right:Pressed:12,30 move:Pressed:3,1 mup:Right:Released"
        );
    }

    // ── bundled demo ──────────────────────────────────────────────────────

    #[test]
    fn bundled_demo_plays_headless() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scripts");
        let ctx = headless_context();
        let script = Script::with_module_dir(&dir).unwrap();
        script.register_capabilities(&ctx).unwrap();
        script.load(&dir.join("game.lua")).unwrap();

        let mut d = FrameDriver::new(Level::new(script), ctx, Color::BLACK);
        let t0 = Instant::now();
        d.start(t0).unwrap();
        d.handle_input(&press(Key::ArrowLeft)).unwrap();

        let mut stage = RecordingStage::default();
        for i in 1..=120 {
            d.run_frame(t0 + Duration::from_millis(16 * i), &mut stage).unwrap();
        }
        assert_eq!(stage.frames.len(), 120);
        // Border, paddle and ball; the score label needs a font asset.
        assert!(stage.frames.iter().all(|&(_, n)| n >= 3));
    }

    #[test]
    fn input_error_is_reported_with_hook() {
        let mut d = driver(
            "function _load() end function _update() end function _draw() end
             function _keydown(k) error('boom') end",
        );
        let err = d.handle_input(&press(Key::A)).unwrap_err();
        assert!(matches!(err, DispatchError::Runtime { hook: "_keydown", .. }));
    }
}
