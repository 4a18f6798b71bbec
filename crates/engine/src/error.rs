// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the engine boundary.

/// Errors that can occur constructing or running an inference engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The model bytes do not start with the expected container magic.
    #[error("not a model container: bad magic")]
    BadMagic,

    /// The container version is newer than this backend understands.
    #[error("unsupported model container version {0}")]
    UnsupportedVersion(u16),

    /// The model bytes end before the container header does.
    #[error("truncated model: need {expected} bytes, have {actual}")]
    TruncatedModel { expected: usize, actual: usize },

    /// A tensor descriptor in the header is malformed.
    #[error("invalid tensor descriptor: {0}")]
    InvalidTensorDesc(String),

    /// A tensor index past the model's tensor count was queried.
    #[error("tensor index {index} out of range (model has {count})")]
    TensorIndex { index: usize, count: usize },

    /// A run buffer does not match the tensor's byte size.
    #[error("{tensor} buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        tensor: &'static str,
        expected: usize,
        actual: usize,
    },
}
