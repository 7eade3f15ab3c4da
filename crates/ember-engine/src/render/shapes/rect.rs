use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::{DrawCmd, DrawKind, DrawList, RectCmd};

use super::common::{InstanceBuffer, ViewportBinding, instance_layout, quad_pipeline, unit_quad};

/// Pipeline and buffers, built on first use for one surface format.
struct RectGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    quad: wgpu::Buffer,
}

impl RectGpu {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let viewport = ViewportBinding::new(ctx.device, "ember rect");
        let pipeline = quad_pipeline(
            ctx,
            "ember rect",
            include_str!("shaders/rect.wgsl"),
            &[&viewport.layout],
            RectInstance::LAYOUT,
        );
        Self {
            format: ctx.surface_format,
            pipeline,
            viewport,
            quad: unit_quad(ctx.device),
        }
    }
}

/// Solid rectangles: fills, and one-pixel outlines drawn as four edge strips.
pub struct RectRenderer {
    gpu: Option<RectGpu>,
    instances: InstanceBuffer,
    /// Instance range per rect run, in paint order.
    runs: Vec<Range<u32>>,
}

impl Default for RectRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            instances: InstanceBuffer::new("ember rect instances"),
            runs: Vec::new(),
        }
    }
}

impl RectRenderer {
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, list: &DrawList) {
        if self.gpu.as_ref().is_none_or(|g| g.format != ctx.surface_format) {
            self.gpu = Some(RectGpu::new(ctx));
        }

        self.runs.clear();
        let mut data = Vec::new();
        for (kind, run) in list.runs() {
            if kind != DrawKind::Rect {
                continue;
            }
            let start = data.len() as u32;
            for cmd in run {
                if let DrawCmd::Rect(rect) = cmd {
                    push_rect_instances(&mut data, rect);
                }
            }
            self.runs.push(start..data.len() as u32);
        }

        if let Some(gpu) = &self.gpu {
            gpu.viewport.write(ctx);
        }
        self.instances.upload(ctx, &data);
    }

    /// Draws the `run`-th rect run of the prepared list.
    pub fn paint(&self, rpass: &mut wgpu::RenderPass<'_>, run: usize) {
        let (Some(gpu), Some(range)) = (&self.gpu, self.runs.get(run)) else { return };
        rpass.set_pipeline(&gpu.pipeline);
        gpu.viewport.bind(rpass);
        self.instances.draw(rpass, &gpu.quad, range.clone());
    }
}

fn push_rect_instances(out: &mut Vec<RectInstance>, cmd: &RectCmd) {
    let r = cmd.rect;
    if r.is_empty() || !r.is_finite() {
        return;
    }

    let color = cmd.color.to_array();
    let (x, y, w, h) = (r.x() as f32, r.y() as f32, r.w() as f32, r.h() as f32);
    let mut push = |x: f32, y: f32, w: f32, h: f32| {
        out.push(RectInstance { origin: [x, y], size: [w, h], color });
    };

    if cmd.filled || w <= 2.0 || h <= 2.0 {
        push(x, y, w, h);
        return;
    }

    push(x, y, w, 1.0);
    push(x, y + h - 1.0, w, 1.0);
    push(x, y + 1.0, 1.0, h - 2.0);
    push(x + w - 1.0, y + 1.0, 1.0, h - 2.0);
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x4];
    const LAYOUT: wgpu::VertexBufferLayout<'static> =
        instance_layout(std::mem::size_of::<Self>(), &Self::ATTRS);
}
