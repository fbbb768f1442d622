/// Startup failures while acquiring the GPU and its presentation surface.
///
/// Every variant is fatal: the demo never enters its render loop without a
/// fully configured device and pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// No wgpu backend can present to this window.
    #[error("graphics API unavailable for this window: {0}")]
    UnsupportedPlatform(String),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    /// The drawable target is missing or has no area.
    #[error("no drawable surface: {0}")]
    NoSurface(String),

    #[error("failed to create wgpu device/queue: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// wgpu rejected a shader, layout or buffer while building the pipeline.
    #[error("render pipeline rejected: {0}")]
    Pipeline(String),
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Action for `err`, before any reconfiguration has been attempted.
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&wgpu::SurfaceError::Other),
            SurfaceErrorAction::SkipFrame
        );
    }

    #[test]
    fn messages_name_the_failure() {
        let err = DeviceError::NoSurface("window has zero area (0x600)".into());
        assert_eq!(err.to_string(), "no drawable surface: window has zero area (0x600)");
        assert_eq!(DeviceError::NoAdapter.to_string(), "no suitable GPU adapter found");
        let err = DeviceError::Pipeline("bad color target".into());
        assert_eq!(err.to_string(), "render pipeline rejected: bad color target");
    }
}
