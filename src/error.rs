// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FragmenterError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FragmenterError {
    /// Wrap an IO error with the path it occurred on
    pub fn file(path: &Path, source: io::Error) -> Self {
        FragmenterError::File {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FragmenterError>;
