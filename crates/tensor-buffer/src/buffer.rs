// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-size byte buffers with a read/write position.
//!
//! The engine boundary deals in raw bytes, so a [`TensorBuffer`] is a plain
//! byte store sized exactly for one tensor, plus a cursor. The position is
//! bookkeeping for the caller; the engine always sees the whole backing
//! slice via [`TensorBuffer::bytes`] / [`TensorBuffer::bytes_mut`].

use crate::{BufferError, DType, Shape};

/// A fixed-size, positioned byte buffer matching one model tensor.
///
/// Capacity is `shape.num_elements() * dtype.size_bytes()` and never changes
/// for the lifetime of the buffer.
#[derive(Debug)]
pub struct TensorBuffer {
    data: Box<[u8]>,
    position: usize,
    shape: Shape,
    dtype: DType,
}

impl TensorBuffer {
    /// Allocates a zero-filled buffer sized exactly for `shape` × `dtype`.
    pub fn fixed(shape: Shape, dtype: DType) -> Self {
        let capacity = shape.size_bytes(dtype);
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            shape,
            dtype,
        }
    }

    /// Returns the fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the current read/write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes between the position and the end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns `true` if any bytes remain past the position.
    pub fn has_remaining(&self) -> bool {
        self.position < self.data.len()
    }

    /// Resets the position to the start. The stored bytes are untouched.
    pub fn clear(&mut self) {
        self.position = 0;
    }

    /// Resets the position to the start. The stored bytes are untouched.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Writes `src` at the current position and advances it.
    pub fn put_slice(&mut self, src: &[u8]) -> Result<(), BufferError> {
        if src.len() > self.remaining() {
            return Err(BufferError::Overflow {
                requested: src.len(),
                remaining: self.remaining(),
            });
        }
        self.data[self.position..self.position + src.len()].copy_from_slice(src);
        self.position += src.len();
        Ok(())
    }

    /// Returns the whole backing store, independent of the position.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the whole backing store mutably, independent of the position.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the shape this buffer was allocated from.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the element type this buffer was allocated from.
    pub fn dtype(&self) -> DType {
        self.dtype
    }
}
