// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-buffer
//!
//! Shape and element-type descriptors plus the fixed-size byte buffers the
//! benchmark harness hands to the inference engine.
//!
//! A [`TensorBuffer`] is allocated once from a [`Shape`]/[`DType`] pair
//! queried from the engine and never resized afterwards. It carries a
//! read/write position in the style of a NIO byte buffer: `clear()` and
//! `rewind()` move the position back to the start without touching the
//! stored bytes.

mod buffer;
mod dtype;
mod error;
mod shape;

pub use buffer::TensorBuffer;
pub use dtype::DType;
pub use error::BufferError;
pub use shape::Shape;
