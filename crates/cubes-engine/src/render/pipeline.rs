use wgpu::util::DeviceExt;

use crate::device::{DeviceError, SurfaceSize};
use crate::geometry::{cube_vertex_bytes, CubeVertex};

use super::depth::{DepthTarget, DEPTH_FORMAT};
use super::uniforms::{
    CubeSlot, QueueSink, UniformSink, MATRIX_BINDING_SIZE, UNIFORM_BUFFER_SIZE,
};

const VERTEX_SHADER: &str = include_str!("shaders/cube.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/cube.frag.wgsl");

/// Every GPU object the two-cube scene draws with.
///
/// Built once by [`PipelineBundle::new`]; there is no other way to obtain a
/// pipeline or bind group. Only the depth target changes afterwards, through
/// [`PipelineBundle::replace_depth`].
pub struct PipelineBundle {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    /// Indexed by [`CubeSlot::index`].
    bind_groups: [wgpu::BindGroup; 2],
    depth: DepthTarget,
}

impl PipelineBundle {
    /// Compiles both shader stages and creates the pipeline, vertex buffer,
    /// uniform buffer, both bind groups and a depth buffer of `size`.
    ///
    /// Everything is created inside a validation error scope; a shader,
    /// layout or buffer rejected by wgpu comes back as
    /// [`DeviceError::Pipeline`] instead of reaching the uncaptured-error
    /// handler.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        size: SurfaceSize,
    ) -> Result<Self, DeviceError> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let bundle = Self::build(device, surface_format, size);
        match pollster::block_on(scope.pop()) {
            None => Ok(bundle),
            Some(err) => Err(DeviceError::Pipeline(err.to_string())),
        }
    }

    fn build(device: &wgpu::Device, surface_format: wgpu::TextureFormat, size: SurfaceSize) -> Self {
        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cubes vertex shader"),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SHADER.into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cubes fragment shader"),
            source: wgpu::ShaderSource::Wgsl(FRAGMENT_SHADER.into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("cubes mvp bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(MATRIX_BINDING_SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cubes pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cubes pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Back faces are the cube's interior.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cubes vbo"),
            contents: cube_vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cubes mvp ubo"),
            size: UNIFORM_BUFFER_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_groups = CubeSlot::ALL.map(|slot| {
            let window = slot.window();
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(match slot {
                    CubeSlot::First => "cubes bind group 1",
                    CubeSlot::Second => "cubes bind group 2",
                }),
                layout: &bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &uniform_buffer,
                        offset: window.offset,
                        size: wgpu::BufferSize::new(window.size),
                    }),
                }],
            })
        });

        let depth = DepthTarget::new(device, size);

        log::debug!(
            "pipeline built: format {:?}, depth {:?} {}x{}",
            surface_format,
            DEPTH_FORMAT,
            size.width,
            size.height
        );

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            bind_groups,
            depth,
        }
    }

    /// Upload target for the uniform buffer, writing through `queue`.
    pub fn uniform_sink<'a>(&'a self, queue: &'a wgpu::Queue) -> impl UniformSink + 'a {
        QueueSink {
            queue,
            buffer: &self.uniform_buffer,
        }
    }

    /// Swaps in a fresh depth buffer of `size` and destroys the previous one.
    pub fn replace_depth(&mut self, device: &wgpu::Device, size: SurfaceSize) {
        let old = std::mem::replace(&mut self.depth, DepthTarget::new(device, size));
        old.destroy();
    }

    /// Current depth buffer size.
    pub fn depth_size(&self) -> SurfaceSize {
        self.depth.size()
    }

    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    pub(crate) fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub(crate) fn bind_group(&self, slot: CubeSlot) -> &wgpu::BindGroup {
        &self.bind_groups[slot.index()]
    }

    pub(crate) fn depth_view(&self) -> &wgpu::TextureView {
        self.depth.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{write_matrix, CubeSlot};

    /// Headless device; `None` when the machine has no usable adapter.
    fn create_test_context() -> Option<(wgpu::Device, wgpu::Queue)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
                .ok()?;
        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()
    }

    const COLOR: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

    #[test]
    fn bundle_builds_and_replaces_depth() {
        let Some((device, queue)) = create_test_context() else {
            return;
        };

        let size = SurfaceSize::new(640, 480);
        let mut bundle = PipelineBundle::new(&device, COLOR, size).expect("valid pipeline");
        assert_eq!(bundle.depth_size(), size);

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        {
            let mut sink = bundle.uniform_sink(&queue);
            write_matrix(&mut sink, CubeSlot::Second, &glam::Mat4::IDENTITY.to_cols_array());
        }
        queue.submit(std::iter::empty());

        let resized = SurfaceSize::new(1024, 768);
        bundle.replace_depth(&device, resized);
        assert_eq!(bundle.depth_size(), resized);
        bundle.replace_depth(&device, resized);
        assert_eq!(bundle.depth_size(), resized);

        assert!(pollster::block_on(scope.pop()).is_none());
    }

    #[test]
    fn non_renderable_color_format_is_an_error() {
        let Some((device, _queue)) = create_test_context() else {
            return;
        };

        let result = PipelineBundle::new(
            &device,
            wgpu::TextureFormat::Depth32Float,
            SurfaceSize::new(64, 64),
        );
        assert!(matches!(result, Err(DeviceError::Pipeline(_))));
    }
}
