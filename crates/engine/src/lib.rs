// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # engine
//!
//! The boundary to the on-device inference runtime the benchmark wraps.
//!
//! The harness only speaks to [`InferenceEngine`]: construct from model
//! bytes plus [`EngineOptions`], query tensor shape/type by index, run
//! synchronously with raw input/output bytes, release on drop. It never
//! interprets the model bytes itself.
//!
//! [`CpuEngine`] is the reference backend behind that trait. It parses the
//! compact model container in [`format`] and executes a deterministic
//! byte-mixing kernel across the configured worker threads. It stands in
//! for a production runtime so the harness is executable and testable;
//! real neural-network kernels are deliberately out of scope.

mod api;
mod cpu;
mod error;
pub mod format;
mod options;

pub use api::{InferenceEngine, TensorInfo};
pub use cpu::CpuEngine;
pub use error::EngineError;
pub use options::EngineOptions;
