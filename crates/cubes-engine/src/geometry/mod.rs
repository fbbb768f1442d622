//! Static cube mesh.
//!
//! Interleaved position + uv records, drawn non-indexed as a triangle list.

mod cube;

pub use cube::{
    cube_vertex_bytes, CubeVertex, CUBE_UV_OFFSET, CUBE_VERTEX_COUNT, CUBE_VERTEX_STRIDE,
    CUBE_VERTICES,
};
