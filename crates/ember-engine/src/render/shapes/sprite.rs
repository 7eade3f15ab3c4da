use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;
use crate::scene::{DrawCmd, DrawKind, DrawList, SpriteCmd};
use crate::sprite::{SpriteFilter, SpriteSheet, SpriteSheetId, SpriteStore};

use super::common::{
    InstanceBuffer, ViewportBinding, clamped_sampler, instance_layout, quad_pipeline,
    texture_bind_group, texture_layout, unit_quad,
};

struct SpriteGpu {
    format: wgpu::TextureFormat,
    filter: SpriteFilter,
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    quad: wgpu::Buffer,
    /// One texture per sheet, uploaded the first time the sheet is drawn.
    sheets: HashMap<SpriteSheetId, wgpu::BindGroup>,
}

impl SpriteGpu {
    fn new(ctx: &RenderCtx<'_>, filter: SpriteFilter) -> Self {
        let viewport = ViewportBinding::new(ctx.device, "ember sprite");
        let texture_layout = texture_layout(ctx.device, "ember sprite");
        let pipeline = quad_pipeline(
            ctx,
            "ember sprite",
            include_str!("shaders/sprite.wgsl"),
            &[&viewport.layout, &texture_layout],
            SpriteInstance::LAYOUT,
        );
        let mode = match filter {
            SpriteFilter::Nearest => wgpu::FilterMode::Nearest,
            SpriteFilter::Linear => wgpu::FilterMode::Linear,
        };
        Self {
            format: ctx.surface_format,
            filter,
            pipeline,
            viewport,
            sampler: clamped_sampler(ctx.device, mode),
            texture_layout,
            quad: unit_quad(ctx.device),
            sheets: HashMap::new(),
        }
    }

    /// False when the sheet has no pixels to upload.
    fn upload_sheet(&mut self, ctx: &RenderCtx<'_>, id: SpriteSheetId, sheet: &SpriteSheet) -> bool {
        if self.sheets.contains_key(&id) {
            return true;
        }
        if sheet.width == 0 || sheet.height == 0 {
            return false;
        }

        let texture = ctx.device.create_texture_with_data(
            ctx.queue,
            &wgpu::TextureDescriptor {
                label: Some("ember sprite sheet"),
                size: wgpu::Extent3d {
                    width: sheet.width,
                    height: sheet.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &sheet.pixels,
        );
        let view = texture.create_view(&Default::default());
        let group = texture_bind_group(ctx.device, &self.texture_layout, &view, &self.sampler);
        self.sheets.insert(id, group);
        true
    }
}

/// Textured quads for `DrawCmd::Sprite`.
///
/// Inside a run, neighbouring sprites from the same sheet share one draw.
pub struct SpriteRenderer {
    gpu: Option<SpriteGpu>,
    instances: InstanceBuffer,
    /// Per sprite run, the `(sheet, instances)` draws in paint order.
    runs: Vec<Vec<(SpriteSheetId, Range<u32>)>>,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            instances: InstanceBuffer::new("ember sprite instances"),
            runs: Vec::new(),
        }
    }
}

impl SpriteRenderer {
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, list: &DrawList, sprites: &SpriteStore) {
        let stale = self
            .gpu
            .as_ref()
            .is_none_or(|g| g.format != ctx.surface_format || g.filter != sprites.filter());
        if stale {
            self.gpu = Some(SpriteGpu::new(ctx, sprites.filter()));
        }
        let Some(gpu) = self.gpu.as_mut() else { return };

        self.runs.clear();
        let mut data = Vec::new();
        for (kind, run) in list.runs() {
            if kind != DrawKind::Sprite {
                continue;
            }
            let mut draws: Vec<(SpriteSheetId, Range<u32>)> = Vec::new();
            for cmd in run {
                let DrawCmd::Sprite(sprite) = cmd else { continue };
                let Some(sheet) = sprites.get(sprite.sheet) else {
                    log::warn!("sprite from unknown sheet {:?} skipped", sprite.sheet);
                    continue;
                };
                if !gpu.upload_sheet(ctx, sprite.sheet, sheet) {
                    continue;
                }

                let at = data.len() as u32;
                data.push(SpriteInstance::new(sprite, sheet));
                match draws.last_mut() {
                    Some((id, range)) if *id == sprite.sheet => range.end = at + 1,
                    _ => draws.push((sprite.sheet, at..at + 1)),
                }
            }
            self.runs.push(draws);
        }

        gpu.viewport.write(ctx);
        self.instances.upload(ctx, &data);
    }

    pub fn paint(&self, rpass: &mut wgpu::RenderPass<'_>, run: usize) {
        let (Some(gpu), Some(draws)) = (&self.gpu, self.runs.get(run)) else { return };
        rpass.set_pipeline(&gpu.pipeline);
        gpu.viewport.bind(rpass);
        for (sheet, range) in draws {
            let Some(group) = gpu.sheets.get(sheet) else { continue };
            rpass.set_bind_group(1, group, &[]);
            self.instances.draw(rpass, &gpu.quad, range.clone());
        }
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct SpriteInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2  // uv_max
    ];
    const LAYOUT: wgpu::VertexBufferLayout<'static> =
        instance_layout(std::mem::size_of::<Self>(), &Self::ATTRS);

    /// Flips mirror the texture coordinates, not the destination.
    fn new(cmd: &SpriteCmd, sheet: &SpriteSheet) -> Self {
        let (tw, th) = (sheet.width as f64, sheet.height as f64);
        let src = cmd.src;
        let (mut u0, mut u1) = ((src.left() / tw) as f32, (src.right() / tw) as f32);
        let (mut v0, mut v1) = ((src.top() / th) as f32, (src.bottom() / th) as f32);
        if cmd.flip_h {
            std::mem::swap(&mut u0, &mut u1);
        }
        if cmd.flip_v {
            std::mem::swap(&mut v0, &mut v1);
        }

        let dst = cmd.dst;
        Self {
            dst_min: [dst.left() as f32, dst.top() as f32],
            dst_max: [dst.right() as f32, dst.bottom() as f32],
            uv_min: [u0, v0],
            uv_max: [u1, v1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;

    fn sheet() -> SpriteSheet {
        SpriteSheet::from_rgba8(64, 32, vec![0; 64 * 32 * 4], 16, 16)
    }

    fn cmd(flip_h: bool, flip_v: bool) -> SpriteCmd {
        SpriteCmd {
            sheet: SpriteSheetId(0),
            src: Rect::new(16.0, 16.0, 16.0, 16.0),
            dst: Rect::new(100.0, 50.0, 32.0, 32.0),
            flip_h,
            flip_v,
        }
    }

    #[test]
    fn uv_covers_source_cell() {
        let inst = SpriteInstance::new(&cmd(false, false), &sheet());
        assert_eq!(inst.uv_min, [0.25, 0.5]);
        assert_eq!(inst.uv_max, [0.5, 1.0]);
        assert_eq!(inst.dst_min, [100.0, 50.0]);
        assert_eq!(inst.dst_max, [132.0, 82.0]);
    }

    #[test]
    fn flips_swap_texture_coordinates() {
        let inst = SpriteInstance::new(&cmd(true, true), &sheet());
        assert_eq!(inst.uv_min, [0.5, 1.0]);
        assert_eq!(inst.uv_max, [0.25, 0.5]);
    }
}
