// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI subcommand implementations.

pub mod bench;
pub mod generate;
pub mod inspect;

use tracing_subscriber::EnvFilter;

/// Initialises tracing from the `-v` count: warn by default, then info,
/// debug, trace. `RUST_LOG` overrides everything.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
