use crate::device::SurfaceSize;

/// Depth buffer format: 24-bit depth, no stencil.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Texture descriptor for a depth buffer covering `size`.
///
/// Empty sizes are clamped to 1x1; wgpu rejects zero-extent textures.
pub fn depth_texture_descriptor(size: SurfaceSize) -> wgpu::TextureDescriptor<'static> {
    wgpu::TextureDescriptor {
        label: Some("cubes depth texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    }
}

/// Depth texture plus its default view.
pub(crate) struct DepthTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: SurfaceSize,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, size: SurfaceSize) -> Self {
        let texture = device.create_texture(&depth_texture_descriptor(size));
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view, size }
    }

    #[inline]
    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub(crate) fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Releases GPU memory now instead of when the last reference drops.
    pub(crate) fn destroy(self) {
        self.texture.destroy();
    }
}
