// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the benchmark harness.

/// Errors that can abort the benchmark sequence.
///
/// There are no partial-failure semantics: any error stops the whole
/// sequence, and nothing is logged-and-continued.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The model asset could not be loaded.
    #[error("model asset error: {0}")]
    Asset(#[from] model_asset::AssetError),

    /// Engine construction, tensor query, or execution failed.
    #[error("engine error: {0}")]
    Engine(#[from] engine::EngineError),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The benchmark worker thread failed.
    #[error("worker error: {0}")]
    Worker(String),
}
