//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) for opaque presentation
//! - acquiring frames and providing encoders/views for rendering

mod context;
mod error;
mod init;
mod surface;

pub use context::{Gpu, GpuFrame};
pub use error::{DeviceError, SurfaceErrorAction};
pub use init::GpuInit;
pub use surface::SurfaceSize;
