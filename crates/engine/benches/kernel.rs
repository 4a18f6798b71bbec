// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the reference backend's run path.

use criterion::{criterion_group, criterion_main, Criterion};
use engine::{format, CpuEngine, EngineOptions, InferenceEngine, TensorInfo};
use tensor_buffer::{DType, Shape};

fn small_vision_model() -> Vec<u8> {
    let input = TensorInfo {
        shape: Shape::new(vec![1, 128, 128, 3]),
        dtype: DType::U8,
    };
    let output = TensorInfo {
        shape: Shape::new(vec![1, 512, 512, 3]),
        dtype: DType::U8,
    };
    format::write_model(&input, &output, &[0x3C; 4096])
}

fn bench_run(c: &mut Criterion) {
    let model = small_vision_model();
    let input: Vec<u8> = (0..128 * 128 * 3).map(|i| (i * 7) as u8).collect();

    let mut group = c.benchmark_group("run");
    for (label, threads, simd) in [
        ("serial", 1usize, false),
        ("serial-simd", 1, true),
        ("threaded-simd", 4, true),
    ] {
        let options = EngineOptions {
            num_threads: threads,
            use_accel_delegate: false,
            use_simd_kernels: simd,
            allow_buffer_handle_output: true,
        };
        let mut engine = CpuEngine::new(&model, options).unwrap();
        let mut output = vec![0u8; 512 * 512 * 3];
        group.bench_function(label, |b| {
            b.iter(|| engine.run(&input, &mut output).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_run);
criterion_main!(benches);
