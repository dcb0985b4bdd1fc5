// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

pub mod scan;
pub mod writer;

pub use scan::{grow_files, unlink_files, MARKER_NAME};
pub use writer::{append_file, create_file, BLOCK_SIZE};
