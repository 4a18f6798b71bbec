// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # model-asset
//!
//! Loads a serialized model file for the inference engine.
//!
//! The file is mapped read-only with `memmap2` (no copy) so the engine can
//! consume the bytes directly, and the same declared byte range is
//! independently stream-read through an MD5 accumulator to compute a
//! content-identity hash. The hash is informational only: it identifies
//! which model produced a set of timings and is never verified against an
//! expected value.

mod error;
mod loader;

pub use error::AssetError;
pub use loader::ModelAsset;
