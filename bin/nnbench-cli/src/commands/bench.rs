// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `nnbench bench` command: run the full benchmark sequence.
//!
//! The sequence executes on the harness's dedicated worker thread via
//! [`BenchRunner`]; this command is the "host": it starts the worker,
//! waits for it, and prints each call's elapsed time. Per the harness
//! contract, timings are reported individually with no aggregation.

use harness::{BenchConfig, BenchRunner};
use std::path::PathBuf;

pub async fn execute(
    config_file: Option<PathBuf>,
    model: PathBuf,
    runs: usize,
    threads: Option<usize>,
    no_simd: bool,
) -> anyhow::Result<()> {
    let config = match config_file {
        Some(path) => BenchConfig::from_file(&path)?,
        None => {
            let mut config = BenchConfig::for_model(model);
            config.runs = runs;
            config.num_threads = threads;
            config.use_simd_kernels = !no_simd;
            config
        }
    };

    tracing::debug!("benchmark config: {config:?}");
    println!("nnbench · model {}", config.model_path.display());

    // The worker blocks on every engine call; keep it off the async runtime.
    let report = tokio::task::spawn_blocking(move || {
        BenchRunner::start(config)?.wait()
    })
    .await??;

    println!("  md5:    {}", report.model_digest);
    println!("  input:  {}", report.input_shape);
    println!("  output: {}", report.output_shape);
    println!();

    for (i, elapsed) in report.timings.iter().enumerate() {
        println!("  run {:>2}: {:.2} ms", i, elapsed.as_secs_f64() * 1000.0);
    }

    Ok(())
}
