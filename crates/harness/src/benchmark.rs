// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The type-state benchmark pipeline.
//!
//! ```text
//! Benchmark<Constructed>   engine built, buffers not yet allocated
//!     │  .prepare_buffers()
//!     ▼
//! Benchmark<Ready>         buffers allocated, input randomised
//! ```
//!
//! Transitions consume the value, so an out-of-order call sequence is a
//! compile error. Within `Ready`, `warmup()` and `inference()` take `&mut
//! self` and may be called any number of times; `close()` consumes the
//! harness and releases the engine together with the mapped model.

use crate::{BenchConfig, HarnessError};
use engine::{CpuEngine, InferenceEngine};
use model_asset::ModelAsset;
use rand::RngCore;
use std::time::{Duration, Instant};
use tensor_buffer::TensorBuffer;

/// Untimed calls performed before the timed run-set.
pub const WARMUP_RUNS: usize = 3;

// ── Type-state markers ─────────────────────────────────────────

/// Engine is constructed but tensor buffers are not yet allocated.
#[derive(Debug)]
pub struct Constructed;

/// Buffers are allocated and the input is randomised.
#[derive(Debug)]
pub struct Ready;

/// Sealed trait for harness states.
pub trait HarnessState: std::fmt::Debug {}
impl HarnessState for Constructed {}
impl HarnessState for Ready {}

// ── Harness ────────────────────────────────────────────────────

/// The benchmark harness for one engine instance.
///
/// Owns the mapped model blob and the engine handle together: both come
/// into existence at construction and are released together by `close()`
/// (or drop). Buffer shapes are queried exactly once and never change for
/// the lifetime of the harness.
pub struct Benchmark<S: HarnessState = Constructed> {
    engine: Box<dyn InferenceEngine>,
    /// Kept so the mapped bytes live exactly as long as the engine handle.
    model: Option<ModelAsset>,
    model_digest: String,
    _state: std::marker::PhantomData<S>,
    // Fields populated by prepare_buffers():
    input: Option<TensorBuffer>,
    output: Option<TensorBuffer>,
    width: Option<usize>,
    height: Option<usize>,
}

// ── Constructed ────────────────────────────────────────────────

impl Benchmark<Constructed> {
    /// Loads the model and constructs the engine.
    ///
    /// Fails fatally on a missing/unreadable model or on engine
    /// construction failure; no fallback configuration is attempted.
    pub fn create(config: &BenchConfig) -> Result<Self, HarnessError> {
        let model = ModelAsset::open(&config.model_path)?;
        let digest = model.digest_hex().to_string();

        let options = config.engine_options();
        tracing::info!(
            "constructing engine: {} threads, simd {}, delegate {}",
            options.num_threads,
            options.use_simd_kernels,
            options.use_accel_delegate,
        );
        let engine = CpuEngine::new(model.bytes(), options)?;

        Ok(Self {
            engine: Box::new(engine),
            model: Some(model),
            model_digest: digest,
            _state: std::marker::PhantomData,
            input: None,
            output: None,
            width: None,
            height: None,
        })
    }

    /// Wraps a pre-built engine (for testing with engine doubles).
    pub fn from_engine(engine: Box<dyn InferenceEngine>, model_digest: String) -> Self {
        Self {
            engine,
            model: None,
            model_digest,
            _state: std::marker::PhantomData,
            input: None,
            output: None,
            width: None,
            height: None,
        }
    }

    /// Queries tensor shapes, allocates buffers, and randomises the input.
    /// Transitions to the `Ready` state.
    ///
    /// Only tensor index 0 is consulted on each side: the harness assumes a
    /// single-input, single-output model. Spatial width/height are
    /// extracted only from a rank-4 input shape, read as
    /// batch/height/width/channel.
    pub fn prepare_buffers(self) -> Result<Benchmark<Ready>, HarnessError> {
        let input_info = self.engine.input_info(0)?;
        let output_info = self.engine.output_info(0)?;
        tracing::info!(
            "inputShape={} inputType={} outputShape={} outputType={}",
            input_info.shape,
            input_info.dtype,
            output_info.shape,
            output_info.dtype,
        );

        let spatial = input_info.shape.spatial_hw();
        let (height, width) = (spatial.map(|(h, _)| h), spatial.map(|(_, w)| w));

        let mut input = TensorBuffer::fixed(input_info.shape, input_info.dtype);
        let output = TensorBuffer::fixed(output_info.shape, output_info.dtype);

        // Fill the whole input with unseeded random bytes, then rewind.
        rand::thread_rng().fill_bytes(input.bytes_mut());
        input.rewind();

        Ok(Benchmark {
            engine: self.engine,
            model: self.model,
            model_digest: self.model_digest,
            _state: std::marker::PhantomData,
            input: Some(input),
            output: Some(output),
            width,
            height,
        })
    }
}

// ── Ready ──────────────────────────────────────────────────────

impl Benchmark<Ready> {
    /// Performs [`WARMUP_RUNS`] untimed inference calls.
    pub fn warmup(&mut self) -> Result<(), HarnessError> {
        for _ in 0..WARMUP_RUNS {
            self.run_once()?;
        }
        tracing::debug!("warmup complete ({WARMUP_RUNS} runs)");
        Ok(())
    }

    /// Performs exactly one timed inference call and logs the elapsed
    /// wall-clock time immediately. No statistics are aggregated.
    pub fn inference(&mut self) -> Result<Duration, HarnessError> {
        self.output_mut().clear();

        let start = Instant::now();
        {
            let _guard = tracing::info_span!("run_inference").entered();
            let input = self.input.as_ref().expect("input exists in Ready state");
            let output = self.output.as_mut().expect("output exists in Ready state");
            self.engine.run(input.bytes(), output.bytes_mut())?;
        }
        let elapsed = start.elapsed();

        tracing::info!("inferT= {} ms", elapsed.as_millis());
        self.output_mut().rewind();
        Ok(elapsed)
    }

    /// One untimed call: clear output, run, rewind output.
    fn run_once(&mut self) -> Result<(), HarnessError> {
        self.output_mut().clear();
        {
            let input = self.input.as_ref().expect("input exists in Ready state");
            let output = self.output.as_mut().expect("output exists in Ready state");
            self.engine.run(input.bytes(), output.bytes_mut())?;
        }
        self.output_mut().rewind();
        Ok(())
    }

    /// Releases the engine handle and the mapped model together.
    pub fn close(self) {
        tracing::debug!("releasing engine and model");
        // Drop order: engine first, then the mapped blob it was built from.
        drop(self.engine);
        drop(self.model);
    }

    /// Returns the input buffer.
    pub fn input(&self) -> &TensorBuffer {
        self.input.as_ref().expect("input exists in Ready state")
    }

    /// Returns the output buffer.
    pub fn output(&self) -> &TensorBuffer {
        self.output.as_ref().expect("output exists in Ready state")
    }

    /// Spatial width, set only for rank-4 (b/h/w/c) input shapes.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Spatial height, set only for rank-4 (b/h/w/c) input shapes.
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    fn output_mut(&mut self) -> &mut TensorBuffer {
        self.output.as_mut().expect("output exists in Ready state")
    }
}

impl<S: HarnessState> Benchmark<S> {
    /// Hex-encoded content hash of the loaded model.
    pub fn model_digest(&self) -> &str {
        &self.model_digest
    }
}

impl<S: HarnessState> std::fmt::Debug for Benchmark<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("state", &std::any::type_name::<S>())
            .field("digest", &self.model_digest)
            .field("has_buffers", &self.input.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{EngineError, TensorInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tensor_buffer::{DType, Shape};

    /// Engine double that counts run calls.
    struct CountingEngine {
        input: TensorInfo,
        output: TensorInfo,
        runs: Arc<AtomicUsize>,
    }

    impl CountingEngine {
        fn boxed(input_dims: Vec<usize>, output_dims: Vec<usize>) -> (Box<Self>, Arc<AtomicUsize>) {
            let runs = Arc::new(AtomicUsize::new(0));
            let engine = Box::new(Self {
                input: TensorInfo {
                    shape: Shape::new(input_dims),
                    dtype: DType::U8,
                },
                output: TensorInfo {
                    shape: Shape::new(output_dims),
                    dtype: DType::U8,
                },
                runs: runs.clone(),
            });
            (engine, runs)
        }
    }

    impl InferenceEngine for CountingEngine {
        fn input_info(&self, index: usize) -> Result<TensorInfo, EngineError> {
            assert_eq!(index, 0, "harness must only consult index 0");
            Ok(self.input.clone())
        }

        fn output_info(&self, index: usize) -> Result<TensorInfo, EngineError> {
            assert_eq!(index, 0, "harness must only consult index 0");
            Ok(self.output.clone())
        }

        fn run(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), EngineError> {
            assert_eq!(input.len(), self.input.size_bytes());
            assert_eq!(output.len(), self.output.size_bytes());
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn ready_harness(
        input_dims: Vec<usize>,
        output_dims: Vec<usize>,
    ) -> (Benchmark<Ready>, Arc<AtomicUsize>) {
        let (engine, runs) = CountingEngine::boxed(input_dims, output_dims);
        let bench = Benchmark::from_engine(engine, "test".into())
            .prepare_buffers()
            .unwrap();
        (bench, runs)
    }

    #[test]
    fn test_buffer_capacities_match_shapes() {
        let (bench, _) = ready_harness(vec![1, 224, 224, 3], vec![1, 1000]);
        assert_eq!(bench.input().capacity(), 150_528);
        assert_eq!(bench.output().capacity(), 1000);
    }

    #[test]
    fn test_width_height_from_rank4() {
        let (bench, _) = ready_harness(vec![1, 224, 224, 3], vec![1, 10]);
        assert_eq!(bench.height(), Some(224));
        assert_eq!(bench.width(), Some(224));
    }

    #[test]
    fn test_width_height_unset_for_other_ranks() {
        let (bench, _) = ready_harness(vec![1, 784], vec![1, 10]);
        assert_eq!(bench.width(), None);
        assert_eq!(bench.height(), None);

        let (bench, _) = ready_harness(vec![1, 8, 8, 3, 2], vec![1, 10]);
        assert_eq!(bench.width(), None);
        assert_eq!(bench.height(), None);
    }

    #[test]
    fn test_input_randomised_and_rewound() {
        let (bench, _) = ready_harness(vec![1, 64, 64, 3], vec![1, 10]);
        assert_eq!(bench.input().position(), 0);
        // 12 KiB of all-identical random bytes is vanishingly unlikely.
        let first = bench.input().bytes()[0];
        assert!(bench.input().bytes().iter().any(|&b| b != first));
    }

    #[test]
    fn test_warmup_runs_exactly_three_calls() {
        let (mut bench, runs) = ready_harness(vec![1, 8, 8, 3], vec![1, 4]);
        bench.warmup().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), WARMUP_RUNS);
        assert_eq!(bench.output().position(), 0);
    }

    #[test]
    fn test_inference_is_one_call_with_nonnegative_elapsed() {
        let (mut bench, runs) = ready_harness(vec![1, 8, 8, 3], vec![1, 4]);
        let elapsed = bench.inference().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(elapsed >= Duration::ZERO);
        assert_eq!(bench.output().position(), 0);
    }

    #[test]
    fn test_repeated_inference_counts() {
        let (mut bench, runs) = ready_harness(vec![1, 8, 8, 3], vec![1, 4]);
        bench.warmup().unwrap();
        for _ in 0..10 {
            bench.inference().unwrap();
        }
        assert_eq!(runs.load(Ordering::SeqCst), WARMUP_RUNS + 10);
        bench.close();
    }

    #[test]
    fn test_debug_format() {
        let (bench, _) = ready_harness(vec![1, 8, 8, 3], vec![1, 4]);
        let debug = format!("{bench:?}");
        assert!(debug.contains("Benchmark"));
        assert!(debug.contains("Ready"));
    }
}
