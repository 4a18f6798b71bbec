// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for model asset loading.

use std::path::PathBuf;

/// Errors that can occur while loading a model file.
///
/// Every variant is fatal to the benchmark sequence: there is no retry and
/// no degraded mode.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The model file is missing or unreadable.
    #[error("cannot read model '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream ended before the declared length was hashed.
    #[error("short read hashing '{path}': got {actual} of {expected} bytes")]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}
