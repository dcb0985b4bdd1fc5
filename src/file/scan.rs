// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{FragmenterError, Result};
use crate::file::writer::append_file;

/// Marker filename exempt from unlinking
pub const MARKER_NAME: &str = "fragmented";

/// Grow up to `count` entries of `dir` by a size drawn from
/// `[0, max_size)` each. Victims are taken in directory-enumeration
/// order, not sampled uniformly; the truncated-enumeration bias is the
/// tool's historical behavior and is kept on purpose.
///
/// Returns (files grown, total bytes requested). `max_size` must be
/// nonzero.
pub fn grow_files(dir: &Path, count: u64, max_size: u64, rng: &mut StdRng) -> Result<(u64, u64)> {
    let mut grown = 0;
    let mut bytes = 0;

    for entry in fs::read_dir(dir).map_err(|e| FragmenterError::file(dir, e))? {
        if grown >= count {
            break;
        }
        let entry = entry.map_err(|e| FragmenterError::file(dir, e))?;

        let size = rng.random_range(0..max_size);
        append_file(&entry.path(), size)?;
        grown += 1;
        bytes += size;
    }

    Ok((grown, bytes))
}

/// Delete up to `count` entries of `dir` in enumeration order, always
/// skipping the marker file. Prints each victim. Irreversible.
///
/// Returns the number of files unlinked.
pub fn unlink_files(dir: &Path, count: u64) -> Result<u64> {
    let mut unlinked = 0;

    for entry in fs::read_dir(dir).map_err(|e| FragmenterError::file(dir, e))? {
        if unlinked >= count {
            break;
        }
        let entry = entry.map_err(|e| FragmenterError::file(dir, e))?;
        if entry.file_name() == MARKER_NAME {
            continue;
        }

        let path = entry.path();
        println!("Unlink {}", path.display());
        fs::remove_file(&path).map_err(|e| FragmenterError::file(&path, e))?;
        unlinked += 1;
    }

    Ok(unlinked)
}
