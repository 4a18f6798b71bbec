// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The engine trait the harness programs against.

use crate::EngineError;
use tensor_buffer::{DType, Shape};

/// Shape and element type of one model tensor, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
    pub shape: Shape,
    pub dtype: DType,
}

impl TensorInfo {
    /// Returns the tensor's byte size: element count × element width.
    pub fn size_bytes(&self) -> usize {
        self.shape.size_bytes(self.dtype)
    }
}

impl std::fmt::Display for TensorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.shape, self.dtype)
    }
}

/// An opaque inference engine instance built from model bytes.
///
/// All calls are synchronous and blocking: the calling thread does not
/// return from [`run`](InferenceEngine::run) until the engine does. There
/// is no cancellation for an in-flight call and no timeout on any call.
/// The handle is released by dropping it.
pub trait InferenceEngine: Send {
    /// Returns shape and element type of the input tensor at `index`.
    fn input_info(&self, index: usize) -> Result<TensorInfo, EngineError>;

    /// Returns shape and element type of the output tensor at `index`.
    fn output_info(&self, index: usize) -> Result<TensorInfo, EngineError>;

    /// Runs the model once: reads `input`, writes `output`.
    ///
    /// Both slices must match the corresponding tensor's byte size exactly.
    fn run(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_info_size() {
        let info = TensorInfo {
            shape: Shape::new(vec![1, 224, 224, 3]),
            dtype: DType::U8,
        };
        assert_eq!(info.size_bytes(), 150_528);
        assert_eq!(format!("{info}"), "[1, 224, 224, 3] u8");
    }
}
