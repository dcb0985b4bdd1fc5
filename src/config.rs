// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};

use crate::error::{FragmenterError, Result};

fn version_string() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), ")")
}

/// Artificial filesystem fragmentation tool
#[derive(Parser, Debug, Clone)]
#[command(name = "fragmenter")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Args {
    /// Target directory to fragment
    #[arg(required = true)]
    pub path: PathBuf,

    /// Fragmentation policy to run
    #[arg(short = 'm', long = "mode", value_enum, default_value = "replicate")]
    pub mode: Mode,

    /// Override the policy's iteration count
    #[arg(long = "iterations")]
    pub iterations: Option<u64>,

    /// Unlink up to N files per iteration (the marker file is never unlinked)
    #[arg(long = "unlink")]
    pub unlink: Option<u64>,

    /// Seed for the sizes/counts generator (default: wall clock)
    #[arg(long = "prng-seed")]
    pub prng_seed: Option<u64>,

    /// Debug log file (line-buffered)
    #[arg(long = "debug-log")]
    pub debug_log: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Seed ten large files, then grow them in small increments
    Replicate,
    /// Grow one large marker file amid small-file churn
    Grow,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub mode: Mode,
    pub iterations: Option<u64>,
    pub unlink: Option<u64>,
    pub prng_seed: u64,
    pub debug_log: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if !args.path.is_dir() {
            return Err(FragmenterError::InvalidPath(format!(
                "{} is not an existing directory",
                args.path.display()
            )));
        }

        if args.unlink == Some(0) {
            return Err(FragmenterError::Config(
                "Unlink count must be at least 1".to_string(),
            ));
        }

        // Sizes and counts come from one generator seeded once per run,
        // so a fixed seed replays the same operation sequence
        let prng_seed = args.prng_seed.unwrap_or_else(wall_clock_seed);

        Ok(Config {
            path: args.path,
            mode: args.mode,
            iterations: args.iterations,
            unlink: args.unlink,
            prng_seed,
            debug_log: args.debug_log,
        })
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_usage_requires_exactly_one_path() {
        assert!(Args::try_parse_from(["fragmenter"]).is_err());
        assert!(Args::try_parse_from(["fragmenter", "/a", "/b"]).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let config = Config::from_args(args(&["fragmenter", path])).unwrap();
        assert_eq!(config.mode, Mode::Replicate);

        let config = Config::from_args(args(&["fragmenter", "-m", "grow", path])).unwrap();
        assert_eq!(config.mode, Mode::Grow);

        assert!(Args::try_parse_from(["fragmenter", "-m", "shuffle", path]).is_err());
    }

    #[test]
    fn test_rejects_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let result = Config::from_args(args(&["fragmenter", path.to_str().unwrap()]));
        assert!(matches!(result, Err(FragmenterError::InvalidPath(_))));
    }

    #[test]
    fn test_rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        let result = Config::from_args(args(&["fragmenter", file.to_str().unwrap()]));
        assert!(matches!(result, Err(FragmenterError::InvalidPath(_))));
    }

    #[test]
    fn test_rejects_zero_unlink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let result = Config::from_args(args(&["fragmenter", "--unlink", "0", path]));
        assert!(matches!(result, Err(FragmenterError::Config(_))));
    }

    #[test]
    fn test_seed_and_iteration_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let config = Config::from_args(args(&[
            "fragmenter",
            "--prng-seed",
            "9",
            "--iterations",
            "5",
            path,
        ]))
        .unwrap();
        assert_eq!(config.prng_seed, 9);
        assert_eq!(config.iterations, Some(5));
    }
}
