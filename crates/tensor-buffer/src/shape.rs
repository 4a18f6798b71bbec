// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors.

use std::fmt;

/// The dimension list of one model tensor, fixed at query time.
///
/// The harness queries shapes exactly once per engine instance and sizes
/// its buffers from them; nothing mutates a shape afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Shape(Box<[usize]>);

impl Shape {
    /// Creates a shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use tensor_buffer::Shape;
    /// let s = Shape::new(vec![1, 224, 224, 3]);
    /// assert_eq!(s.rank(), 4);
    /// assert_eq!(s.num_elements(), 150_528);
    /// ```
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims.into_boxed_slice())
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Total element count; 1 for a rank-0 (scalar) shape.
    pub fn num_elements(&self) -> usize {
        self.0.iter().product()
    }

    /// The dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// The size of dimension `index`, or `None` past the rank.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    /// Memory footprint in bytes for elements of `dtype`.
    pub fn size_bytes(&self, dtype: super::DType) -> usize {
        self.num_elements() * dtype.size_bytes()
    }

    /// Spatial (height, width) for an image-style tensor.
    ///
    /// Only a rank-4 shape is read this way, as batch/height/width/channel;
    /// any other rank has no spatial interpretation and yields `None`.
    pub fn spatial_hw(&self) -> Option<(usize, usize)> {
        match self.0.as_ref() {
            &[_, h, w, _] => Some((h, w)),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        write!(f, "[")?;
        for d in self.0.iter() {
            write!(f, "{sep}{d}")?;
            sep = ", ";
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![1, 224, 224, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}
