//! Uniform buffer layout: two MVP matrices in 256-byte aligned slots.

use std::ops::Range;

/// Size of one packed `mat4x4<f32>`.
pub const MATRIX_SIZE: u64 = std::mem::size_of::<[f32; 16]>() as u64;

/// Distance between slot starts.
///
/// 256 is the largest `min_uniform_buffer_offset_alignment` wgpu allows, so
/// the second slot is a legal binding offset on every adapter.
pub const SLOT_STRIDE: u64 = 256;

/// Whole uniform buffer: second slot start + one matrix.
pub const UNIFORM_BUFFER_SIZE: u64 = SLOT_STRIDE + MATRIX_SIZE;

/// Minimum binding size declared in the bind group layout.
pub(crate) const MATRIX_BINDING_SIZE: wgpu::BufferSize = match wgpu::BufferSize::new(MATRIX_SIZE) {
    Some(size) => size,
    None => panic!("matrix binding size must be non-zero"),
};

/// Which cube (and therefore which bind group / uniform slot).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CubeSlot {
    First,
    Second,
}

impl CubeSlot {
    /// Draw order.
    pub const ALL: [CubeSlot; 2] = [CubeSlot::First, CubeSlot::Second];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            CubeSlot::First => 0,
            CubeSlot::Second => 1,
        }
    }

    /// Fixed `{offset, size}` window of this slot in the uniform buffer.
    #[inline]
    pub const fn window(self) -> UniformWindow {
        UniformWindow {
            offset: self.index() as u64 * SLOT_STRIDE,
            size: MATRIX_SIZE,
        }
    }
}

/// A byte window into the uniform buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformWindow {
    pub offset: u64,
    pub size: u64,
}

impl UniformWindow {
    #[inline]
    pub const fn range(self) -> Range<u64> {
        self.offset..self.offset + self.size
    }
}

/// Destination for uniform uploads.
///
/// The GPU implementation forwards to `Queue::write_buffer`; tests use a
/// CPU-side byte mirror.
pub trait UniformSink {
    fn write_bytes(&mut self, offset: u64, bytes: &[u8]);
}

/// Uploads `matrix` into `slot`'s window and nothing else.
pub fn write_matrix(sink: &mut impl UniformSink, slot: CubeSlot, matrix: &[f32; 16]) {
    let window = slot.window();
    let bytes: &[u8] = bytemuck::cast_slice(matrix);
    debug_assert_eq!(bytes.len() as u64, window.size);
    sink.write_bytes(window.offset, bytes);
}

/// Forwards writes to a GPU buffer through the queue's staging belt.
pub(crate) struct QueueSink<'a> {
    pub queue: &'a wgpu::Queue,
    pub buffer: &'a wgpu::Buffer,
}

impl UniformSink for QueueSink<'_> {
    fn write_bytes(&mut self, offset: u64, bytes: &[u8]) {
        self.queue.write_buffer(self.buffer, offset, bytes);
    }
}
