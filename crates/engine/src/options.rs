// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine construction options.

/// Configuration handed to the engine at construction time.
///
/// Mirrors the knobs the wrapped runtime exposes: worker thread count, the
/// hardware-acceleration delegate, vectorized CPU kernels, and whether the
/// engine may return buffer handles for outputs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineOptions {
    /// Worker threads for kernel execution. 0 means run serially.
    pub num_threads: usize,
    /// Hardware-acceleration delegate (NPU/GPU offload).
    pub use_accel_delegate: bool,
    /// Vectorized CPU kernels.
    pub use_simd_kernels: bool,
    /// Allow the engine to hand out buffer handles for outputs.
    pub allow_buffer_handle_output: bool,
}

impl EngineOptions {
    /// The benchmark's standard configuration for the current host:
    /// half the available hardware threads (floor), acceleration delegate
    /// off, vectorized kernels on, buffer-handle output allowed.
    pub fn for_host() -> Self {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2);
        Self {
            num_threads: available / 2,
            use_accel_delegate: false,
            use_simd_kernels: true,
            allow_buffer_handle_output: true,
        }
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::for_host()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_host_flags() {
        let opts = EngineOptions::for_host();
        assert!(!opts.use_accel_delegate);
        assert!(opts.use_simd_kernels);
        assert!(opts.allow_buffer_handle_output);

        let available = std::thread::available_parallelism().unwrap().get();
        assert_eq!(opts.num_threads, available / 2);
    }

    #[test]
    fn test_default_is_host_config() {
        assert_eq!(EngineOptions::default(), EngineOptions::for_host());
    }
}
