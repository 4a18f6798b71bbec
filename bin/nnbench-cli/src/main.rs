// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nnbench
//!
//! Command-line interface for the nnbench inference benchmark harness.
//!
//! ## Usage
//! ```bash
//! # Generate a synthetic model container
//! nnbench generate --output quicksr.nbm --input-shape 1,128,128,3 --output-shape 1,512,512,3
//!
//! # Benchmark it: warmup + timed runs on a dedicated worker thread
//! nnbench bench --model quicksr.nbm --runs 10
//!
//! # Inspect size, content hash, and tensor shapes
//! nnbench inspect --model quicksr.nbm
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nnbench",
    about = "On-device inference benchmark harness",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (overrides CLI arguments).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark sequence: construct, buffers, warmup, timed runs.
    Bench {
        /// Path to the model file.
        #[arg(short, long)]
        model: std::path::PathBuf,

        /// Number of timed inference calls after warmup.
        #[arg(short, long, default_value_t = 10)]
        runs: usize,

        /// Engine worker threads (default: half the hardware threads).
        #[arg(short, long)]
        threads: Option<usize>,

        /// Disable vectorized CPU kernels.
        #[arg(long)]
        no_simd: bool,
    },

    /// Inspect a model: length, content hash, tensor shapes and types.
    Inspect {
        /// Path to the model file.
        #[arg(short, long)]
        model: std::path::PathBuf,
    },

    /// Generate a synthetic model container with random weights.
    Generate {
        /// Output path for the model file.
        #[arg(short, long)]
        output: std::path::PathBuf,

        /// Input tensor shape, comma-separated (e.g. "1,224,224,3").
        #[arg(long, default_value = "1,128,128,3")]
        input_shape: String,

        /// Output tensor shape, comma-separated.
        #[arg(long, default_value = "1,512,512,3")]
        output_shape: String,

        /// Element type for both tensors: f32, f16, i8, u8.
        #[arg(long, default_value = "u8")]
        dtype: String,

        /// Size of the random weight payload in bytes.
        #[arg(long, default_value_t = 4096)]
        weight_bytes: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Bench {
            model,
            runs,
            threads,
            no_simd,
        } => commands::bench::execute(cli.config, model, runs, threads, no_simd).await,
        Commands::Inspect { model } => commands::inspect::execute(model).await,
        Commands::Generate {
            output,
            input_shape,
            output_shape,
            dtype,
            weight_bytes,
        } => commands::generate::execute(output, input_shape, output_shape, dtype, weight_bytes).await,
    }
}
