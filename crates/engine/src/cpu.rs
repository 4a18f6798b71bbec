// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reference CPU backend.
//!
//! [`CpuEngine`] implements [`InferenceEngine`] over the container format
//! in [`crate::format`]. The "model" is a 256-entry substitution table
//! folded from the weight payload; `run` maps every output byte through it
//! from a gathered input byte. That keeps execution deterministic, cheap,
//! and shape-agnostic while still exercising thread splitting and the
//! vectorized-kernel toggle the way a production runtime would.

use crate::format::ModelHeader;
use crate::{EngineError, EngineOptions, InferenceEngine, TensorInfo};

/// A constructed engine instance for one model.
pub struct CpuEngine {
    input: TensorInfo,
    output: TensorInfo,
    /// Substitution table folded from the weight payload.
    table: Box<[u8; 256]>,
    options: EngineOptions,
}

impl CpuEngine {
    /// Constructs an engine from model bytes and options.
    ///
    /// Parses and validates the container, then allocates the kernel's
    /// lookup state. Any failure here is fatal to the caller; there is no
    /// fallback configuration.
    pub fn new(model_bytes: &[u8], options: EngineOptions) -> Result<Self, EngineError> {
        let header = ModelHeader::parse(model_bytes)?;
        let weights = &model_bytes[header.weights_offset..];
        let table = fold_weights(weights);

        if options.use_accel_delegate {
            // No delegate exists in the reference backend; the flag is
            // accepted so configs stay portable, but execution stays on CPU.
            tracing::warn!("acceleration delegate requested but unavailable, running on CPU");
        }

        tracing::debug!(
            "engine constructed: input {} output {} threads {} simd {}",
            header.input,
            header.output,
            options.num_threads,
            options.use_simd_kernels,
        );

        Ok(Self {
            input: header.input,
            output: header.output,
            table,
            options,
        })
    }

    /// Returns the options this engine was constructed with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl InferenceEngine for CpuEngine {
    fn input_info(&self, index: usize) -> Result<TensorInfo, EngineError> {
        if index != 0 {
            return Err(EngineError::TensorIndex { index, count: 1 });
        }
        Ok(self.input.clone())
    }

    fn output_info(&self, index: usize) -> Result<TensorInfo, EngineError> {
        if index != 0 {
            return Err(EngineError::TensorIndex { index, count: 1 });
        }
        Ok(self.output.clone())
    }

    fn run(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), EngineError> {
        let expected_in = self.input.size_bytes();
        if input.len() != expected_in {
            return Err(EngineError::BufferSize {
                tensor: "input",
                expected: expected_in,
                actual: input.len(),
            });
        }
        let expected_out = self.output.size_bytes();
        if output.len() != expected_out {
            return Err(EngineError::BufferSize {
                tensor: "output",
                expected: expected_out,
                actual: output.len(),
            });
        }

        let threads = self.options.num_threads.max(1);
        let simd = self.options.use_simd_kernels;
        let table = &self.table;

        if threads == 1 {
            mix(table, input, output, 0, simd);
        } else {
            // Split the output evenly; each worker gathers from the shared
            // read-only input.
            let chunk = output.len().div_ceil(threads);
            std::thread::scope(|scope| {
                for (i, out_chunk) in output.chunks_mut(chunk).enumerate() {
                    scope.spawn(move || mix(table, input, out_chunk, i * chunk, simd));
                }
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for CpuEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuEngine")
            .field("input", &format!("{}", self.input))
            .field("output", &format!("{}", self.output))
            .field("num_threads", &self.options.num_threads)
            .finish()
    }
}

/// Folds arbitrary weight bytes into a 256-entry substitution table.
///
/// Every weight byte perturbs one slot, so any single-byte change to the
/// payload changes the kernel.
fn fold_weights(weights: &[u8]) -> Box<[u8; 256]> {
    let mut table = [0u8; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = i as u8;
    }
    for (i, &w) in weights.iter().enumerate() {
        let slot = i % 256;
        table[slot] = table[slot].rotate_left(1) ^ w;
    }
    Box::new(table)
}

/// Maps `out[k]` from a gathered input byte through the table.
///
/// `base` is the chunk's offset in the full output tensor so gathering is
/// identical regardless of how the work was split.
fn mix(table: &[u8; 256], input: &[u8], out_chunk: &mut [u8], base: usize, simd: bool) {
    if simd {
        // Fixed-width inner blocks keep the loop trivially unrollable and
        // auto-vectorizable.
        const LANES: usize = 16;
        let mut k = 0;
        while k + LANES <= out_chunk.len() {
            for l in 0..LANES {
                let j = base + k + l;
                out_chunk[k + l] = table[input[j % input.len()] as usize];
            }
            k += LANES;
        }
        for (l, slot) in out_chunk.iter_mut().enumerate().skip(k) {
            let j = base + l;
            *slot = table[input[j % input.len()] as usize];
        }
    } else {
        for (l, slot) in out_chunk.iter_mut().enumerate() {
            let j = base + l;
            *slot = table[input[j % input.len()] as usize];
        }
    }
}
