//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer and
//! the render loop state.

mod runtime;
mod shutdown;

pub use runtime::{Runtime, RuntimeConfig};
pub use shutdown::ShutdownHandle;
