//! `ember`: runs a Lua game script in a window.
//!
//! ```bash
//! ember                                   # scripts/settings.lua + scripts/game.lua
//! ember --scripts demo --game demo/pong.lua
//! ember --mute --log ember_script=debug
//! ```

mod game;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ember_engine::audio::{AudioDevice, NullAudio, RodioAudio};
use ember_engine::device::GpuInit;
use ember_engine::logging::{LoggingConfig, init_logging};
use ember_engine::window::{Runtime, RuntimeConfig};
use ember_script::{HostContext, Settings};
use winit::dpi::LogicalSize;

use crate::game::GameApp;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Lua-scripted 2D game player")]
#[command(version)]
struct Cli {
    /// Directory searched by `require` for game modules.
    #[arg(long, default_value = "scripts")]
    scripts: PathBuf,

    /// Settings script (default: <scripts>/settings.lua).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Game script (default: <scripts>/game.lua).
    #[arg(long)]
    game: Option<PathBuf>,

    /// Run without opening an audio device.
    #[arg(long)]
    mute: bool,

    /// Present without waiting for vertical blank.
    #[arg(long)]
    no_vsync: bool,

    /// Log filter in `env_logger` syntax; overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(match &cli.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("ember: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings_path = cli.settings.unwrap_or_else(|| cli.scripts.join("settings.lua"));
    let game_path = cli.game.unwrap_or_else(|| cli.scripts.join("game.lua"));

    let settings = Settings::load(&settings_path)
        .with_context(|| format!("reading settings from {}", settings_path.display()))?;
    log::info!(
        "{} at {}x{}",
        settings.title,
        settings.screen_width,
        settings.screen_height
    );

    let audio: Box<dyn AudioDevice> = if cli.mute {
        Box::new(NullAudio::default())
    } else {
        match RodioAudio::open_default() {
            Ok(dev) => Box::new(dev),
            Err(err) => {
                log::warn!("no audio output ({err}); continuing silent");
                Box::new(NullAudio::default())
            }
        }
    };

    let host = HostContext::new(audio, settings.sprite_filter()).into_shared();
    let app = GameApp::new(host, cli.scripts, game_path, settings.background);

    let config = RuntimeConfig {
        title: settings.title,
        initial_size: LogicalSize::new(
            f64::from(settings.screen_width),
            f64::from(settings.screen_height),
        ),
        fullscreen: settings.full_screen,
        show_cursor: settings.show_cursor,
        grab_cursor: settings.mouse_grab,
    };
    let gpu_init = GpuInit {
        present_mode: if cli.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        },
        ..GpuInit::default()
    };

    Runtime::run(config, gpu_init, app)?.into_result()
}
