use std::ops::Range;

use crate::device::{Gpu, GpuFrame};
use crate::geometry::CUBE_VERTEX_COUNT;

use super::pipeline::PipelineBundle;
use super::uniforms::CubeSlot;

/// Color the surface is cleared to each frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Depth the depth buffer is cleared to each frame (the far plane).
pub const CLEAR_DEPTH: f32 = 1.0;

/// Per-cube commands inside the frame's render pass.
///
/// Implemented over a live `wgpu::RenderPass`; tests record the calls instead.
pub trait PassRecorder {
    fn bind_slot(&mut self, slot: CubeSlot);
    fn draw(&mut self, vertices: Range<u32>);
}

/// Binds each cube's group in fixed order and draws the whole mesh for it.
pub fn record_cube_draws(recorder: &mut impl PassRecorder) {
    for slot in CubeSlot::ALL {
        recorder.bind_slot(slot);
        recorder.draw(0..CUBE_VERTEX_COUNT);
    }
}

struct BundlePass<'p, 'e> {
    pass: &'p mut wgpu::RenderPass<'e>,
    bundle: &'p PipelineBundle,
}

impl PassRecorder for BundlePass<'_, '_> {
    fn bind_slot(&mut self, slot: CubeSlot) {
        self.pass.set_bind_group(0, self.bundle.bind_group(slot), &[]);
    }

    fn draw(&mut self, vertices: Range<u32>) {
        self.pass.draw(vertices, 0..1);
    }
}

/// Records the single render pass of a frame into `frame.encoder`.
pub fn encode_frame(frame: &mut GpuFrame, bundle: &PipelineBundle) {
    let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("cubes pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &frame.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: bundle.depth_view(),
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_DEPTH),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_pipeline(bundle.pipeline());
    rpass.set_vertex_buffer(0, bundle.vertex_buffer().slice(..));

    record_cube_draws(&mut BundlePass {
        pass: &mut rpass,
        bundle,
    });
}

/// Acquires the current surface image, draws both cubes and submits.
///
/// `before_present` runs right before submission (winit's
/// `pre_present_notify`). Submission is fire-and-forget.
pub fn render_frame(
    gpu: &Gpu<'_>,
    bundle: &PipelineBundle,
    before_present: impl FnOnce(),
) -> Result<(), wgpu::SurfaceError> {
    let mut frame = gpu.begin_frame()?;
    encode_frame(&mut frame, bundle);
    before_present();
    gpu.submit(frame);
    Ok(())
}
