// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for buffer operations.

/// Errors that can occur when writing into a [`crate::TensorBuffer`].
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// A write would run past the end of the fixed-size buffer.
    #[error("buffer overflow: tried to write {requested} bytes with {remaining} remaining")]
    Overflow { requested: usize, remaining: usize },
}
