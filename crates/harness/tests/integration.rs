// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: the full benchmark pipeline against the real CPU
//! backend, from a model file on disk through timed inference.

use engine::format::write_model;
use engine::TensorInfo;
use harness::{BenchConfig, BenchRunner, Benchmark, WARMUP_RUNS};
use std::io::Write;
use tensor_buffer::{DType, Shape};

// ── Helpers ────────────────────────────────────────────────────

fn info(dims: Vec<usize>, dtype: DType) -> TensorInfo {
    TensorInfo {
        shape: Shape::new(dims),
        dtype,
    }
}

/// Writes a model container to a temp file and returns the handle.
fn model_file(input: TensorInfo, output: TensorInfo, weights: &[u8]) -> tempfile::NamedTempFile {
    let bytes = write_model(&input, &output, weights);
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&bytes).unwrap();
    f.flush().unwrap();
    f
}

/// A quantised mobile-vision-like model: 224×224×3 u8 in, 1000 logits out.
fn vision_model() -> tempfile::NamedTempFile {
    model_file(
        info(vec![1, 224, 224, 3], DType::U8),
        info(vec![1, 1000], DType::U8),
        &[0x5A; 2048],
    )
}

fn config_for(model: &tempfile::NamedTempFile) -> BenchConfig {
    let mut config = BenchConfig::for_model(model.path().to_path_buf());
    config.num_threads = Some(2);
    config
}

// ── Pipeline ───────────────────────────────────────────────────

#[test]
fn test_create_reports_model_identity() {
    let model = vision_model();
    let bench = Benchmark::create(&config_for(&model)).unwrap();

    let digest = bench.model_digest();
    assert_eq!(digest.len(), 32);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_buffer_setup_matches_quantised_vision_scenario() {
    let model = vision_model();
    let bench = Benchmark::create(&config_for(&model))
        .unwrap()
        .prepare_buffers()
        .unwrap();

    // [1, 224, 224, 3] × 1 byte per element.
    assert_eq!(bench.input().capacity(), 150_528);
    assert_eq!(bench.output().capacity(), 1000);
    assert_eq!(bench.width(), Some(224));
    assert_eq!(bench.height(), Some(224));
    assert_eq!(bench.input().position(), 0);
}

#[test]
fn test_no_spatial_dims_for_rank2_input() {
    let model = model_file(
        info(vec![1, 784], DType::F32),
        info(vec![1, 10], DType::F32),
        &[3; 64],
    );
    let bench = Benchmark::create(&config_for(&model))
        .unwrap()
        .prepare_buffers()
        .unwrap();

    assert_eq!(bench.input().capacity(), 784 * 4);
    assert_eq!(bench.output().capacity(), 40);
    assert_eq!(bench.width(), None);
    assert_eq!(bench.height(), None);
}

#[test]
fn test_warmup_then_timed_runs() {
    let model = vision_model();
    let mut bench = Benchmark::create(&config_for(&model))
        .unwrap()
        .prepare_buffers()
        .unwrap();

    bench.warmup().unwrap();
    assert_eq!(WARMUP_RUNS, 3);

    for _ in 0..10 {
        let elapsed = bench.inference().unwrap();
        assert!(elapsed.as_nanos() > 0);
        assert_eq!(bench.output().position(), 0);
    }

    bench.close();
}

#[test]
fn test_output_actually_written() {
    let model = vision_model();
    let mut bench = Benchmark::create(&config_for(&model))
        .unwrap()
        .prepare_buffers()
        .unwrap();

    bench.inference().unwrap();
    // The mixing kernel maps random input bytes through a nontrivial
    // table; 1000 output bytes staying all-zero would mean no run happened.
    assert!(bench.output().bytes().iter().any(|&b| b != 0));
}

#[test]
fn test_missing_model_is_fatal() {
    let config = BenchConfig::for_model("/nonexistent/quicksr.nbm".into());
    assert!(Benchmark::create(&config).is_err());
}

#[test]
fn test_garbage_model_is_fatal() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(b"definitely not a model container").unwrap();
    f.flush().unwrap();

    let config = BenchConfig::for_model(f.path().to_path_buf());
    assert!(Benchmark::create(&config).is_err());
}

// ── Host lifecycle ─────────────────────────────────────────────

#[test]
fn test_runner_end_to_end() {
    let model = vision_model();
    let mut config = config_for(&model);
    config.runs = 4;

    let report = BenchRunner::start(config).unwrap().wait().unwrap();
    assert_eq!(report.timings.len(), 4);
    assert_eq!(report.input_shape, "[1, 224, 224, 3]");
    assert_eq!(report.output_shape, "[1, 1000]");
    assert!(report.timings.iter().all(|t| t.as_nanos() > 0));
}

#[test]
fn test_same_model_same_digest_across_runs() {
    let model = vision_model();

    let mut config = config_for(&model);
    config.runs = 1;
    let first = BenchRunner::start(config.clone()).unwrap().wait().unwrap();
    let second = BenchRunner::start(config).unwrap().wait().unwrap();

    assert_eq!(first.model_digest, second.model_digest);
}
