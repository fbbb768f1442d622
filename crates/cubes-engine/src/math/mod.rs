//! Transform builder.
//!
//! Pure functions turning a cube's placement into the MVP matrix its vertex
//! shader consumes. Backed by `glam`.

mod transform;

pub use glam::{Mat4, Vec3};
pub use transform::{mvp_matrix, Projection, Transform};
