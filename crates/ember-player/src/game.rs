use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, anyhow};
use ember_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use ember_engine::input::InputEvent;
use ember_engine::paint::Color;
use ember_engine::render::SceneRenderer;
use ember_script::{FrameDriver, HostContext, Level, Script, SharedContext, Stage};

/// Presents a recorded frame onto the window surface.
struct GpuStage<'s, 'a, 'w> {
    frame: &'s mut FrameCtx<'a, 'w>,
    scene: &'s mut SceneRenderer,
}

impl Stage for GpuStage<'_, '_, '_> {
    fn present(&mut self, background: Color, host: &mut HostContext) -> anyhow::Result<()> {
        let HostContext { draw_list, sprites, fonts, .. } = host;
        let scene = &mut *self.scene;

        let control = self.frame.render(background, |ctx, target| {
            scene.render(ctx, target, draw_list, sprites, fonts);
        });
        match control {
            AppControl::Continue => Ok(()),
            AppControl::Exit => Err(anyhow!("GPU surface lost")),
        }
    }
}

/// Hosts one game script inside the windowed runtime.
///
/// The script is loaded once the window exists, so `core.screen` reports the
/// real window size from the first `_load` on.
pub struct GameApp {
    host: SharedContext,
    module_dir: PathBuf,
    game_path: PathBuf,
    background: Color,
    driver: Option<FrameDriver>,
    scene: SceneRenderer,
    failure: Option<anyhow::Error>,
}

impl GameApp {
    pub fn new(host: SharedContext, module_dir: PathBuf, game_path: PathBuf, background: Color) -> Self {
        Self {
            host,
            module_dir,
            game_path,
            background,
            driver: None,
            scene: SceneRenderer::new(),
            failure: None,
        }
    }

    /// The first error that stopped the game, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self) -> anyhow::Result<()> {
        let script = Script::with_module_dir(&self.module_dir)?;
        script.register_capabilities(&self.host)?;
        script.load(&self.game_path)?;
        log::info!("game loaded from {}", self.game_path.display());

        let mut driver = FrameDriver::new(Level::new(script), self.host.clone(), self.background);
        driver.start(Instant::now()).context("_load failed")?;
        self.driver = Some(driver);
        Ok(())
    }

    fn fail(&mut self, err: anyhow::Error) -> AppControl {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        AppControl::Exit
    }
}

impl App for GameApp {
    fn on_resumed(&mut self, window: &WindowCtx<'_>) -> AppControl {
        let (w, h) = window.logical_size();
        self.host
            .borrow_mut()
            .set_screen_size(w.round() as u32, h.round() as u32);

        match self.start() {
            Ok(()) => AppControl::Continue,
            Err(err) => self.fail(err),
        }
    }

    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let Some(driver) = self.driver.as_mut() else {
            return AppControl::Continue;
        };
        if let Err(err) = driver.handle_input(event) {
            return self.fail(err.into());
        }
        if driver.is_quit() { AppControl::Exit } else { AppControl::Continue }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(driver) = self.driver.as_mut() else {
            return AppControl::Continue;
        };

        let mut stage = GpuStage {
            frame: ctx,
            scene: &mut self.scene,
        };
        if let Err(err) = driver.run_frame(Instant::now(), &mut stage) {
            return self.fail(err.into());
        }
        if driver.is_quit() { AppControl::Exit } else { AppControl::Continue }
    }
}
