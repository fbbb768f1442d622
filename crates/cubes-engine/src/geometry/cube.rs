use bytemuck::{Pod, Zeroable};

/// One interleaved cube vertex: position then uv.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Byte stride of one vertex record (3 + 2 floats).
pub const CUBE_VERTEX_STRIDE: u64 = std::mem::size_of::<CubeVertex>() as u64;

/// Byte offset of the uv attribute inside a vertex record.
pub const CUBE_UV_OFFSET: u64 = std::mem::offset_of!(CubeVertex, uv) as u64;

/// Number of vertices in [`CUBE_VERTICES`] (6 faces, 2 triangles each).
pub const CUBE_VERTEX_COUNT: u32 = 36;

impl CubeVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x2  // uv
    ];

    /// Vertex buffer layout for slot 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: CUBE_VERTEX_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> CubeVertex {
    CubeVertex { position: [x, y, z], uv: [u, w] }
}

/// Unit cube centred on the origin (extent -1..1), counter-clockwise front faces.
#[rustfmt::skip]
pub const CUBE_VERTICES: [CubeVertex; CUBE_VERTEX_COUNT as usize] = [
    // +X
    v( 1.0, -1.0,  1.0, 0.0, 1.0), v( 1.0, -1.0, -1.0, 1.0, 1.0), v( 1.0,  1.0, -1.0, 1.0, 0.0),
    v( 1.0, -1.0,  1.0, 0.0, 1.0), v( 1.0,  1.0, -1.0, 1.0, 0.0), v( 1.0,  1.0,  1.0, 0.0, 0.0),
    // -X
    v(-1.0, -1.0, -1.0, 0.0, 1.0), v(-1.0, -1.0,  1.0, 1.0, 1.0), v(-1.0,  1.0,  1.0, 1.0, 0.0),
    v(-1.0, -1.0, -1.0, 0.0, 1.0), v(-1.0,  1.0,  1.0, 1.0, 0.0), v(-1.0,  1.0, -1.0, 0.0, 0.0),
    // +Y
    v(-1.0,  1.0,  1.0, 0.0, 1.0), v( 1.0,  1.0,  1.0, 1.0, 1.0), v( 1.0,  1.0, -1.0, 1.0, 0.0),
    v(-1.0,  1.0,  1.0, 0.0, 1.0), v( 1.0,  1.0, -1.0, 1.0, 0.0), v(-1.0,  1.0, -1.0, 0.0, 0.0),
    // -Y
    v(-1.0, -1.0, -1.0, 0.0, 1.0), v( 1.0, -1.0, -1.0, 1.0, 1.0), v( 1.0, -1.0,  1.0, 1.0, 0.0),
    v(-1.0, -1.0, -1.0, 0.0, 1.0), v( 1.0, -1.0,  1.0, 1.0, 0.0), v(-1.0, -1.0,  1.0, 0.0, 0.0),
    // +Z
    v(-1.0, -1.0,  1.0, 0.0, 1.0), v( 1.0, -1.0,  1.0, 1.0, 1.0), v( 1.0,  1.0,  1.0, 1.0, 0.0),
    v(-1.0, -1.0,  1.0, 0.0, 1.0), v( 1.0,  1.0,  1.0, 1.0, 0.0), v(-1.0,  1.0,  1.0, 0.0, 0.0),
    // -Z
    v( 1.0, -1.0, -1.0, 0.0, 1.0), v(-1.0, -1.0, -1.0, 1.0, 1.0), v(-1.0,  1.0, -1.0, 1.0, 0.0),
    v( 1.0, -1.0, -1.0, 0.0, 1.0), v(-1.0,  1.0, -1.0, 1.0, 0.0), v( 1.0,  1.0, -1.0, 0.0, 0.0),
];

/// Raw bytes of the geometry table, as uploaded to the vertex buffer.
pub fn cube_vertex_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}
