// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::error::{FragmenterError, Result};

/// Length of generated filenames
pub const NAME_LEN: usize = 25;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fill `buf` from the OS entropy source. All-or-error: a failed read
/// aborts the caller rather than leaving a short or zeroed buffer.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| FragmenterError::Entropy(e.to_string()))
}

/// Random lowercase-alphanumeric name of exactly `len` characters.
/// Each character is one random byte reduced modulo the alphabet size.
/// No collision detection; at 25 characters collisions are not a
/// practical concern.
pub fn random_name(len: usize) -> Result<String> {
    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    Ok(bytes
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect())
}
