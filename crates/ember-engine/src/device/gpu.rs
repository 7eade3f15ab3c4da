use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// GPU options chosen at startup.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Requested swap behavior. Falls back to FIFO when the surface does
    /// not offer it; FIFO also paces the game loop.
    pub present_mode: wgpu::PresentMode,

    /// Pick an sRGB surface format when one exists.
    ///
    /// Off by default so that authored colors and sprite texels reach the
    /// screen unconverted.
    pub prefer_srgb: bool,

    pub power: wgpu::PowerPreference,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
            prefer_srgb: false,
            power: wgpu::PowerPreference::LowPower,
        }
    }
}

/// What the caller should do with a frame that failed to acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame should work.
    Reconfigured,
    SkipFrame,
    Fatal,
}

/// An acquired swapchain image with an encoder recording into it.
pub struct GpuFrame {
    pub texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Device, queue and the configured surface of the game window.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .context("creating the window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        // 2D sprites and text fit inside the WebGL2 baseline.
        let limits = wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ember device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("opening the GPU device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb)
            .context("the surface reports no texture formats")?;
        let present_mode = pick_present_mode(&caps.present_modes, init.present_mode);
        log::debug!("surface {format:?}, {present_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or_default(),
            view_formats: Vec::new(),
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self { surface, device, queue, config })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Follows a window resize. Minimized (zero-sized) windows keep the old
    /// configuration since a surface cannot be zero-sized.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let texture = self.surface.get_current_texture()?;
        let view = texture.texture.create_view(&Default::default());
        let encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("ember frame"),
        });
        Ok(GpuFrame { texture, view, encoder })
    }

    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit([frame.encoder.finish()]);
        frame.texture.present();
    }

    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                self.surface.configure(&self.device, &self.config);
                SurfaceErrorAction::Reconfigured
            }
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        }
    }
}

fn pick_format(formats: &[wgpu::TextureFormat], srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| f.is_srgb() == srgb)
        .or(formats.first())
        .copied()
}

fn pick_present_mode(supported: &[wgpu::PresentMode], wanted: wgpu::PresentMode) -> wgpu::PresentMode {
    // The Auto* modes are resolved by wgpu itself.
    let auto = matches!(wanted, wgpu::PresentMode::AutoVsync | wgpu::PresentMode::AutoNoVsync);
    if auto || supported.contains(&wanted) {
        wanted
    } else {
        log::warn!("present mode {wanted:?} unsupported; using Fifo");
        wgpu::PresentMode::Fifo
    }
}
