/// Initialization parameters for the GPU layer.
///
/// Only knobs the demo actually varies per platform live here.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is vsync-locked and supported everywhere, which gives one tick per
    /// display refresh.
    pub present_mode: wgpu::PresentMode,

    /// Alpha compositing against the window background.
    ///
    /// Defaults to `Opaque`. If unsupported on the current surface, a supported
    /// mode is selected instead.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// The uniform slot layout assumes `min_uniform_buffer_offset_alignment`
    /// of at most 256, which holds for the defaults.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::Opaque),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
