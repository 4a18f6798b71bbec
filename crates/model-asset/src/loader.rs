// Copyright (c) 2025 The nnbench authors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Model file loading: memory map + streaming content hash.
//!
//! The map and the hash are two independent reads of the same declared
//! range. The map hands the engine a zero-copy view; the hash streams the
//! file in fixed-size chunks through the digest so arbitrarily large models
//! never need a second in-memory copy.

use crate::AssetError;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Chunk size for streaming the file through the digest.
const DIGEST_CHUNK: usize = 8192;

/// A loaded model file: read-only mapped bytes plus a content-identity hash.
///
/// The map is immutable and safely shareable; nothing ever writes to it.
/// Dropping the `ModelAsset` unmaps the file.
pub struct ModelAsset {
    mmap: memmap2::Mmap,
    digest_hex: String,
    path: PathBuf,
}

impl ModelAsset {
    /// Opens and maps a model file, computing its content hash.
    ///
    /// The declared length is the file length; both the map and the hash
    /// cover exactly that range.
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let io_err = |source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let declared_len = file.metadata().map_err(io_err)?.len();

        // Map the declared range directly for the engine (no copy).
        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(io_err)?;

        // Separately stream the same range through the digest.
        let digest_hex = hash_declared_range(File::open(path).map_err(io_err)?, declared_len, path)?;

        tracing::info!(
            "model '{}': {} bytes mapped, md5 {}",
            path.display(),
            declared_len,
            digest_hex,
        );

        Ok(Self {
            mmap,
            digest_hex,
            path: path.to_path_buf(),
        })
    }

    /// Returns the mapped model bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Returns the mapped length in bytes.
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Returns `true` if the mapped region is empty.
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Returns the hex-encoded 128-bit content hash (32 lowercase chars).
    pub fn digest_hex(&self) -> &str {
        &self.digest_hex
    }

    /// Returns the path the asset was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for ModelAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAsset")
            .field("path", &self.path)
            .field("len", &self.mmap.len())
            .field("digest", &self.digest_hex)
            .finish()
    }
}

/// Streams exactly `declared_len` bytes through MD5 in fixed-size chunks
/// and hex-encodes the digest, two characters per byte.
fn hash_declared_range(
    mut file: File,
    declared_len: u64,
    path: &Path,
) -> Result<String, AssetError> {
    let mut hasher = Md5::new();
    let mut chunk = [0u8; DIGEST_CHUNK];
    let mut hashed: u64 = 0;

    while hashed < declared_len {
        let want = chunk.len().min((declared_len - hashed) as usize);
        let n = file.read(&mut chunk[..want]).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            return Err(AssetError::ShortRead {
                path: path.to_path_buf(),
                expected: declared_len,
                actual: hashed,
            });
        }
        hasher.update(&chunk[..n]);
        hashed += n as u64;
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    Ok(hex)
}
