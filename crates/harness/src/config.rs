// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmark configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! model_path = "./models/quicksr-small.nbm"
//! runs = 10
//! num_threads = 2
//! use_simd_kernels = true
//! ```

use engine::EngineOptions;
use std::path::{Path, PathBuf};

/// Configuration for one benchmark run-set.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchConfig {
    /// Path to the model file.
    pub model_path: PathBuf,
    /// Number of timed inference calls after warmup.
    #[serde(default = "default_runs")]
    pub runs: usize,
    /// Engine worker threads. Defaults to half the hardware threads.
    pub num_threads: Option<usize>,
    /// Whether the engine uses vectorized CPU kernels.
    #[serde(default = "default_true")]
    pub use_simd_kernels: bool,
}

fn default_runs() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl BenchConfig {
    /// Creates a configuration for the given model with all defaults.
    pub fn for_model(model_path: PathBuf) -> Self {
        Self {
            model_path,
            runs: default_runs(),
            num_threads: None,
            use_simd_kernels: true,
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::HarnessError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::HarnessError> {
        toml::from_str(toml_str)
            .map_err(|e| super::HarnessError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::HarnessError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::HarnessError::Config(format!("TOML serialise error: {e}")))
    }

    /// Resolves the engine options for this configuration.
    ///
    /// Starts from [`EngineOptions::for_host`] (half the hardware threads,
    /// delegate off, vectorized kernels on) and applies the overrides.
    pub fn engine_options(&self) -> EngineOptions {
        let mut options = EngineOptions::for_host();
        if let Some(threads) = self.num_threads {
            options.num_threads = threads;
        }
        options.use_simd_kernels = self.use_simd_kernels;
        options
    }
}
