// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # harness
//!
//! The benchmark harness: loads a model, constructs an engine, sets up
//! tensor buffers, and times repeated inference calls.
//!
//! The pipeline is type-state enforced:
//! ```text
//! Benchmark<Constructed>
//!     │  .prepare_buffers()
//!     ▼
//! Benchmark<Ready>
//!     │  .warmup() / .inference()*
//!     ▼
//!   .close()
//! ```
//! Each transition consumes the old value, so calling `inference()` before
//! buffer setup is a compile error rather than undefined behaviour.
//!
//! [`BenchRunner`] is the two-method surface a host lifecycle drives:
//! `start()` hands the whole sequence to one dedicated worker thread and
//! `shutdown()` stops and joins it.

mod benchmark;
mod config;
mod error;
mod runner;

pub use benchmark::{Benchmark, Constructed, HarnessState, Ready, WARMUP_RUNS};
pub use config::BenchConfig;
pub use error::HarnessError;
pub use runner::{BenchRunner, RunReport};
