use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::{DrawCmd, DrawKind, DrawList, TextCmd};
use crate::text::FontSystem;

use super::common::{
    InstanceBuffer, ViewportBinding, clamped_sampler, instance_layout, quad_pipeline,
    texture_bind_group, texture_layout, unit_quad,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl AtlasSlot {
    fn new((x, y): (u32, u32), w: u32, h: u32) -> Self {
        let size = ATLAS_SIZE as f32;
        Self {
            uv_min: [x as f32 / size, y as f32 / size],
            uv_max: [(x + w) as f32 / size, (y + h) as f32 / size],
        }
    }
}

/// Row-based ("shelf") allocator for a square atlas.
///
/// Glyphs are placed left to right; a glyph that does not fit opens a new
/// shelf below the tallest glyph of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    atlas: wgpu::Texture,
    atlas_group: wgpu::BindGroup,
    quad: wgpu::Buffer,
}

impl TextGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let viewport = ViewportBinding::new(ctx.device, "ember text");
        let atlas_layout = texture_layout(ctx.device, "ember text");
        let pipeline = quad_pipeline(
            ctx,
            "ember text",
            include_str!("shaders/text.wgsl"),
            &[&viewport.layout, &atlas_layout],
            GlyphInstance::LAYOUT,
        );

        let atlas = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ember glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let sampler = clamped_sampler(ctx.device, wgpu::FilterMode::Linear);
        let view = atlas.create_view(&Default::default());
        let atlas_group = texture_bind_group(ctx.device, &atlas_layout, &view, &sampler);

        Self {
            format: ctx.surface_format,
            pipeline,
            viewport,
            atlas,
            atlas_group,
            quad: unit_quad(ctx.device),
        }
    }

    fn write_glyph(&self, ctx: &RenderCtx<'_>, (x, y): (u32, u32), w: u32, h: u32, coverage: &[u8]) {
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            coverage,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: None,
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );
    }
}

/// Glyph quads for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue the first time a (font, glyph, size)
/// combination is drawn and packed into a 2048 x 2048 coverage atlas that
/// lives as long as the renderer. Once the atlas is full, new glyphs are
/// skipped with a single warning.
pub struct TextRenderer {
    gpu: Option<TextGpu>,
    packer: ShelfPacker,
    glyphs: HashMap<GlyphRasterConfig, AtlasSlot>,
    warned_full: bool,
    layout: Layout<()>,
    instances: InstanceBuffer,
    runs: Vec<Range<u32>>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyphs: HashMap::new(),
            warned_full: false,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            instances: InstanceBuffer::new("ember text instances"),
            runs: Vec::new(),
        }
    }
}

impl TextRenderer {
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, list: &DrawList, fonts: &FontSystem) {
        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            // A fresh atlas starts empty.
            self.gpu = Some(TextGpu::new(ctx));
            self.packer = ShelfPacker::new(ATLAS_SIZE);
            self.glyphs.clear();
            self.warned_full = false;
        }

        self.runs.clear();
        let mut data = Vec::new();
        for (kind, run) in list.runs() {
            if kind != DrawKind::Text {
                continue;
            }
            let start = data.len() as u32;
            for cmd in run {
                if let DrawCmd::Text(text) = cmd {
                    self.lay_out(ctx, text, fonts, &mut data);
                }
            }
            self.runs.push(start..data.len() as u32);
        }

        if let Some(gpu) = &self.gpu {
            gpu.viewport.write(ctx);
        }
        self.instances.upload(ctx, &data);
    }

    pub fn paint(&self, rpass: &mut wgpu::RenderPass<'_>, run: usize) {
        let (Some(gpu), Some(range)) = (&self.gpu, self.runs.get(run)) else { return };
        rpass.set_pipeline(&gpu.pipeline);
        gpu.viewport.bind(rpass);
        rpass.set_bind_group(1, &gpu.atlas_group, &[]);
        self.instances.draw(rpass, &gpu.quad, range.clone());
    }

    fn lay_out(&mut self, ctx: &RenderCtx<'_>, cmd: &TextCmd, fonts: &FontSystem, out: &mut Vec<GlyphInstance>) {
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("text with unknown font {:?} skipped", cmd.font);
            return;
        };

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x as f32,
            y: cmd.origin.y as f32,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

        // Copied out so the atlas can be mutated while iterating.
        let placed: Vec<_> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width as f32, g.height as f32))
            .collect();

        let color = cmd.color.to_array();
        for (key, x, y, w, h) in placed {
            let Some(slot) = self.slot_for(ctx, font, key) else { continue };
            out.push(GlyphInstance {
                dst_min: [x, y],
                dst_max: [x + w, y + h],
                uv_min: slot.uv_min,
                uv_max: slot.uv_max,
                color,
            });
        }
    }

    /// Atlas slot for `key`, rasterizing and uploading it on first use.
    fn slot_for(&mut self, ctx: &RenderCtx<'_>, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasSlot> {
        if let Some(slot) = self.glyphs.get(&key) {
            return Some(*slot);
        }

        let (metrics, coverage) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        if w == 0 || h == 0 {
            return None;
        }

        let Some(at) = self.packer.place(w, h) else {
            if self.packer.full && !self.warned_full {
                log::warn!("glyph atlas full ({ATLAS_SIZE}x{ATLAS_SIZE}); new glyphs are dropped");
                self.warned_full = true;
            }
            return None;
        };
        self.gpu.as_ref()?.write_glyph(ctx, at, w, h, &coverage);

        let slot = AtlasSlot::new(at, w, h);
        self.glyphs.insert(key, slot);
        Some(slot)
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];
    const LAYOUT: wgpu::VertexBufferLayout<'static> =
        instance_layout(std::mem::size_of::<Self>(), &Self::ATTRS);
}
