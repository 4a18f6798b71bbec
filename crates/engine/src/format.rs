// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The reference backend's single-file model container.
//!
//! The harness treats model bytes as opaque; this format belongs to the
//! backend alone. Layout (all integers little-endian):
//!
//! ```text
//! magic    4 bytes   b"NBM1"
//! version  u16       currently 1
//! input    TensorDesc
//! output   TensorDesc
//! weights  rest of file (opaque to everyone but the kernel)
//!
//! TensorDesc:
//! dtype    u8        0=f32, 1=f16, 2=i8, 3=u8
//! rank     u8        at most 8
//! dims     u32 × rank
//! ```

use crate::{EngineError, TensorInfo};
use tensor_buffer::{DType, Shape};

/// Container magic.
pub const MAGIC: [u8; 4] = *b"NBM1";

/// Current container version.
pub const VERSION: u16 = 1;

/// Maximum tensor rank a descriptor may declare.
pub const MAX_RANK: usize = 8;

/// Parsed container header: tensor descriptors plus the weight payload
/// offset into the model bytes.
#[derive(Debug, Clone)]
pub struct ModelHeader {
    pub input: TensorInfo,
    pub output: TensorInfo,
    pub weights_offset: usize,
}

impl ModelHeader {
    /// Parses and validates the container header from model bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, EngineError> {
        let mut cursor = Cursor { bytes, pos: 0 };

        let magic = cursor.take(4)?;
        if magic != MAGIC {
            return Err(EngineError::BadMagic);
        }

        let version = u16::from_le_bytes(cursor.take(2)?.try_into().unwrap());
        if version != VERSION {
            return Err(EngineError::UnsupportedVersion(version));
        }

        let input = cursor.tensor_desc()?;
        let output = cursor.tensor_desc()?;

        Ok(Self {
            input,
            output,
            weights_offset: cursor.pos,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], EngineError> {
        if self.pos + n > self.bytes.len() {
            return Err(EngineError::TruncatedModel {
                expected: self.pos + n,
                actual: self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn tensor_desc(&mut self) -> Result<TensorInfo, EngineError> {
        let dtype = dtype_from_code(self.take(1)?[0])?;
        let rank = self.take(1)?[0] as usize;
        if rank > MAX_RANK {
            return Err(EngineError::InvalidTensorDesc(format!(
                "rank {rank} exceeds maximum {MAX_RANK}"
            )));
        }

        let mut dims = Vec::with_capacity(rank);
        for _ in 0..rank {
            let d = u32::from_le_bytes(self.take(4)?.try_into().unwrap()) as usize;
            if d == 0 {
                return Err(EngineError::InvalidTensorDesc(
                    "zero-sized dimension".into(),
                ));
            }
            dims.push(d);
        }

        let shape = Shape::new(dims);
        // Reject descriptors whose byte size overflows.
        let elems: Option<usize> = shape
            .dims()
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d));
        match elems.and_then(|e| e.checked_mul(dtype.size_bytes())) {
            Some(_) => Ok(TensorInfo { shape, dtype }),
            None => Err(EngineError::InvalidTensorDesc(
                "tensor byte size overflows".into(),
            )),
        }
    }
}

fn dtype_from_code(code: u8) -> Result<DType, EngineError> {
    match code {
        0 => Ok(DType::F32),
        1 => Ok(DType::F16),
        2 => Ok(DType::I8),
        3 => Ok(DType::U8),
        other => Err(EngineError::InvalidTensorDesc(format!(
            "unknown dtype code {other}"
        ))),
    }
}

fn dtype_code(dtype: DType) -> u8 {
    match dtype {
        DType::F32 => 0,
        DType::F16 => 1,
        DType::I8 => 2,
        DType::U8 => 3,
    }
}

/// Serialises a model container. Used by tests and the `generate` command.
pub fn write_model(input: &TensorInfo, output: &TensorInfo, weights: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(64 + weights.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    write_tensor_desc(&mut out, input);
    write_tensor_desc(&mut out, output);
    out.extend_from_slice(weights);
    out
}

fn write_tensor_desc(out: &mut Vec<u8>, info: &TensorInfo) {
    out.push(dtype_code(info.dtype));
    out.push(info.shape.rank() as u8);
    for &d in info.shape.dims() {
        out.extend_from_slice(&(d as u32).to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(dims: Vec<usize>, dtype: DType) -> TensorInfo {
        TensorInfo {
            shape: Shape::new(dims),
            dtype,
        }
    }

    #[test]
    fn test_write_then_parse() {
        let input = info(vec![1, 128, 128, 3], DType::U8);
        let output = info(vec![1, 512, 512, 3], DType::U8);
        let bytes = write_model(&input, &output, &[0xCC; 64]);

        let header = ModelHeader::parse(&bytes).unwrap();
        assert_eq!(header.input, input);
        assert_eq!(header.output, output);
        assert_eq!(&bytes[header.weights_offset..], &[0xCC; 64]);
    }

    #[test]
    fn test_bad_magic() {
        let err = ModelHeader::parse(b"XXXX\x01\x00").unwrap_err();
        assert!(matches!(err, EngineError::BadMagic));
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = write_model(
            &info(vec![4], DType::U8),
            &info(vec![4], DType::U8),
            &[],
        );
        bytes[4] = 9; // bump version
        let err = ModelHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = write_model(
            &info(vec![1, 8, 8, 3], DType::F32),
            &info(vec![1, 8, 8, 3], DType::F32),
            &[],
        );
        let err = ModelHeader::parse(&bytes[..10]).unwrap_err();
        assert!(matches!(err, EngineError::TruncatedModel { .. }));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let bytes = write_model(
            &info(vec![1, 0, 3], DType::U8),
            &info(vec![4], DType::U8),
            &[],
        );
        let err = ModelHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTensorDesc(_)));
    }

    #[test]
    fn test_unknown_dtype_rejected() {
        let mut bytes = write_model(
            &info(vec![4], DType::U8),
            &info(vec![4], DType::U8),
            &[],
        );
        bytes[6] = 42; // input dtype code
        let err = ModelHeader::parse(&bytes).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTensorDesc(_)));
    }
}
