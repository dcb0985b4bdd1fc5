// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::entropy;
use crate::error::{FragmenterError, Result};

/// Payload block size. Files are filled one whole block at a time, so a
/// requested size is overshot by up to BLOCK_SIZE - 1 bytes.
pub const BLOCK_SIZE: usize = 1024;

/// Create `path` and fill it with at least `size` bytes of random data.
/// An existing file at `path` is overwritten from offset 0, not truncated.
pub fn create_file(path: &Path, size: u64) -> Result<()> {
    println!("Seed {} = {}", path.display(), size);

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o700);
    }
    let file = options
        .open(path)
        .map_err(|e| FragmenterError::file(path, e))?;

    fill(file, path, size)
}

/// Append at least `size` bytes of random data to an existing file.
/// The file must already exist; a missing path is an error.
pub fn append_file(path: &Path, size: u64) -> Result<()> {
    println!("Grow {} + {}", path.display(), size);

    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| FragmenterError::file(path, e))?;

    fill(file, path, size)
}

/// Write whole random blocks until at least `size` bytes have landed,
/// then fsync so delayed allocation cannot coalesce the writes into
/// sequential extents.
fn fill(mut file: File, path: &Path, size: u64) -> Result<()> {
    let mut block = [0u8; BLOCK_SIZE];
    let mut written: u64 = 0;

    while written < size {
        entropy::fill_random(&mut block)?;
        file.write_all(&block)
            .map_err(|e| FragmenterError::file(path, e))?;
        written += BLOCK_SIZE as u64;
    }

    file.sync_all().map_err(|e| FragmenterError::file(path, e))?;

    Ok(())
}
