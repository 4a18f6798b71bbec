// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnbench inspect` command: print model identity and tensor metadata.

use engine::{CpuEngine, EngineOptions, InferenceEngine};
use model_asset::ModelAsset;
use std::path::PathBuf;

pub async fn execute(model: PathBuf) -> anyhow::Result<()> {
    let asset = ModelAsset::open(&model)?;

    println!("model:  {}", asset.path().display());
    println!("size:   {} bytes", asset.len());
    println!("md5:    {}", asset.digest_hex());

    let engine = CpuEngine::new(asset.bytes(), EngineOptions::for_host())?;
    println!("input:  {}", engine.input_info(0)?);
    println!("output: {}", engine.output_info(0)?);

    Ok(())
}
