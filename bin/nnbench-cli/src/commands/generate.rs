// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnbench generate` command: write a synthetic model container.
//!
//! Lets the benchmark run without any external model files, the same way
//! the harness's own tests do.

use engine::{format, TensorInfo};
use rand::RngCore;
use std::path::PathBuf;
use tensor_buffer::{DType, Shape};

pub async fn execute(
    output: PathBuf,
    input_shape: String,
    output_shape: String,
    dtype: String,
    weight_bytes: usize,
) -> anyhow::Result<()> {
    let dtype = parse_dtype(&dtype)?;
    let input = TensorInfo {
        shape: parse_shape(&input_shape)?,
        dtype,
    };
    let out = TensorInfo {
        shape: parse_shape(&output_shape)?,
        dtype,
    };

    let mut weights = vec![0u8; weight_bytes];
    rand::thread_rng().fill_bytes(&mut weights);

    let bytes = format::write_model(&input, &out, &weights);
    std::fs::write(&output, &bytes)?;

    println!(
        "wrote {} ({} bytes): input {} output {}",
        output.display(),
        bytes.len(),
        input,
        out,
    );
    Ok(())
}

/// Parses a comma-separated dimension list like "1,224,224,3".
fn parse_shape(s: &str) -> anyhow::Result<Shape> {
    let dims = s
        .split(',')
        .map(|d| {
            d.trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid dimension '{}' in shape '{s}'", d.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if dims.is_empty() || dims.iter().any(|&d| d == 0) {
        anyhow::bail!("shape '{s}' must list nonzero dimensions");
    }
    Ok(Shape::new(dims))
}

fn parse_dtype(s: &str) -> anyhow::Result<DType> {
    match s.to_lowercase().as_str() {
        "f32" => Ok(DType::F32),
        "f16" => Ok(DType::F16),
        "i8" => Ok(DType::I8),
        "u8" => Ok(DType::U8),
        other => anyhow::bail!("unknown dtype '{other}'; expected 'f32', 'f16', 'i8', or 'u8'"),
    }
}
