//! Twin cubes engine crate.
//!
//! Owns the platform + GPU runtime pieces for a demo that draws two rotating
//! cubes with one pipeline, one uniform buffer split into two aligned slots,
//! and one depth buffer.

pub mod device;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;
