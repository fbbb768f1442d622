//! GPU rendering subsystem.
//!
//! One pipeline draws the cube mesh twice per frame, once per uniform slot.
//!
//! Convention:
//! - right-handed view space, camera at the origin looking down -Z
//! - clip-space depth 0..1, cleared to the far plane each frame

mod depth;
mod frame;
mod pipeline;
pub(crate) mod uniforms;

pub use depth::{depth_texture_descriptor, DEPTH_FORMAT};
pub use frame::{encode_frame, record_cube_draws, render_frame, PassRecorder, CLEAR_COLOR, CLEAR_DEPTH};
pub use pipeline::PipelineBundle;
pub use uniforms::{
    write_matrix, CubeSlot, UniformSink, UniformWindow, MATRIX_SIZE, SLOT_STRIDE,
    UNIFORM_BUFFER_SIZE,
};
