// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host-lifecycle surface: one worker thread, two methods.
//!
//! The host calls [`BenchRunner::start`] from its creation hook and
//! [`BenchRunner::shutdown`] from its destruction hook. The whole benchmark
//! sequence (construct → buffers → warmup → timed runs) executes strictly
//! sequentially on a single dedicated worker thread; every engine call
//! blocks that worker until the engine returns.
//!
//! Teardown joins the worker before anything is released, so a shutdown
//! request can never race an in-flight inference call: the stop flag is
//! observed between iterations and the engine handle is dropped by the
//! worker itself after its last call completes.

use crate::{BenchConfig, Benchmark, HarnessError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// What one completed benchmark sequence produced.
///
/// Timings are reported per call, in order; nothing is aggregated.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Content hash of the benchmarked model.
    pub model_digest: String,
    /// Input tensor shape, as logged.
    pub input_shape: String,
    /// Output tensor shape, as logged.
    pub output_shape: String,
    /// Elapsed wall-clock time of each timed inference call.
    pub timings: Vec<Duration>,
}

/// Runs the benchmark sequence on one dedicated worker thread.
pub struct BenchRunner {
    worker: Option<JoinHandle<Result<RunReport, HarnessError>>>,
    stop: Arc<AtomicBool>,
}

impl BenchRunner {
    /// Spawns the worker and starts the sequence.
    pub fn start(config: BenchConfig) -> Result<Self, HarnessError> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let worker = std::thread::Builder::new()
            .name("inference-worker".into())
            .spawn(move || run_sequence(config, stop_flag))
            .map_err(|e| HarnessError::Worker(format!("cannot spawn worker: {e}")))?;

        Ok(Self {
            worker: Some(worker),
            stop,
        })
    }

    /// Requests stop and joins the worker, returning its report.
    ///
    /// The stop request is observed between inference iterations; an
    /// in-flight call always runs to completion first.
    pub fn shutdown(mut self) -> Result<RunReport, HarnessError> {
        self.stop.store(true, Ordering::SeqCst);
        self.join_worker()
    }

    /// Waits for the sequence to finish without requesting an early stop.
    pub fn wait(mut self) -> Result<RunReport, HarnessError> {
        self.join_worker()
    }

    fn join_worker(&mut self) -> Result<RunReport, HarnessError> {
        let worker = self
            .worker
            .take()
            .expect("worker is present until joined exactly once");
        worker
            .join()
            .map_err(|_| HarnessError::Worker("inference worker panicked".into()))?
    }
}

impl Drop for BenchRunner {
    fn drop(&mut self) {
        // A dropped runner still stops and joins so the worker never
        // outlives the host that started it.
        if self.worker.is_some() {
            self.stop.store(true, Ordering::SeqCst);
            let _ = self.join_worker();
        }
    }
}

/// The full sequence, executed on the worker thread.
fn run_sequence(
    config: BenchConfig,
    stop: Arc<AtomicBool>,
) -> Result<RunReport, HarnessError> {
    let mut bench = Benchmark::create(&config)?.prepare_buffers()?;

    let input_shape = format!("{}", bench.input().shape());
    let output_shape = format!("{}", bench.output().shape());
    let model_digest = bench.model_digest().to_string();

    bench.warmup()?;

    let mut timings = Vec::with_capacity(config.runs);
    for i in 0..config.runs {
        if stop.load(Ordering::SeqCst) {
            tracing::info!("stop requested after {i} of {} runs", config.runs);
            break;
        }
        timings.push(bench.inference()?);
    }

    bench.close();

    Ok(RunReport {
        model_digest,
        input_shape,
        output_shape,
        timings,
    })
}
