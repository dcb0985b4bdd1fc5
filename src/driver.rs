// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::path::Path;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

use crate::debug_log;
use crate::entropy::{self, NAME_LEN};
use crate::error::Result;
use crate::file::scan::{grow_files, unlink_files, MARKER_NAME};
use crate::file::writer::{append_file, create_file};
use crate::policy::{Policy, Seeding, Step};
use crate::progress::RunStats;

/// Execute `policy` against `dir`, drawing all sizes and counts from
/// `rng`. Any filesystem or entropy failure aborts the run; a partially
/// fragmented directory is not worth continuing into.
pub fn run(dir: &Path, policy: &Policy, rng: &mut StdRng) -> Result<RunStats> {
    let started = Instant::now();
    let mut stats = RunStats::default();

    seed(dir, &policy.seeding, rng, &mut stats)?;

    for iteration in 0..policy.iterations {
        debug_log!("Iteration {}/{}", iteration + 1, policy.iterations);
        for step in &policy.steps {
            run_step(dir, step, rng, &mut stats)?;
        }
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}

fn seed(dir: &Path, seeding: &Seeding, rng: &mut StdRng, stats: &mut RunStats) -> Result<()> {
    match seeding {
        Seeding::RandomFiles { count, max_size } => {
            create_randoms(dir, *count, *max_size, rng, stats)
        }
        Seeding::Marker { size } => {
            create_file(&dir.join(MARKER_NAME), *size)?;
            stats.seeded += 1;
            stats.bytes += *size;
            Ok(())
        }
    }
}

fn run_step(dir: &Path, step: &Step, rng: &mut StdRng, stats: &mut RunStats) -> Result<()> {
    match step {
        Step::CreateRandom { count, max_size } => {
            create_randoms(dir, count.draw(rng), *max_size, rng, stats)
        }
        Step::AppendMarker { max_size } => {
            let size = rng.random_range(0..*max_size);
            append_file(&dir.join(MARKER_NAME), size)?;
            stats.grown += 1;
            stats.bytes += size;
            Ok(())
        }
        Step::GrowRandom { count, max_size } => {
            let (grown, bytes) = grow_files(dir, count.draw(rng), *max_size, rng)?;
            stats.grown += grown;
            stats.bytes += bytes;
            Ok(())
        }
        Step::UnlinkRandom { count } => {
            stats.unlinked += unlink_files(dir, count.draw(rng))?;
            Ok(())
        }
    }
}

fn create_randoms(
    dir: &Path,
    count: u64,
    max_size: u64,
    rng: &mut StdRng,
    stats: &mut RunStats,
) -> Result<()> {
    for _ in 0..count {
        let name = entropy::random_name(NAME_LEN)?;
        let size = rng.random_range(0..max_size);
        create_file(&dir.join(name), size)?;
        stats.seeded += 1;
        stats.bytes += size;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Count;
    use rand::SeedableRng;
    use std::fs;

    fn file_names(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_replicate_style_run() {
        let dir = tempfile::tempdir().unwrap();
        let policy = Policy {
            seeding: Seeding::RandomFiles {
                count: 3,
                max_size: 2048,
            },
            iterations: 4,
            steps: vec![Step::GrowRandom {
                count: Count::UpTo(3),
                max_size: 512,
            }],
        };
        let mut rng = StdRng::seed_from_u64(42);

        let stats = run(dir.path(), &policy, &mut rng).unwrap();
        assert_eq!(stats.seeded, 3);
        assert_eq!(stats.unlinked, 0);

        // Nothing is deleted; every file carries a generated name
        let names = file_names(dir.path());
        assert_eq!(names.len(), 3);
        for name in names {
            assert_eq!(name.len(), NAME_LEN);
        }
    }

    #[test]
    fn test_grow_style_run() {
        let dir = tempfile::tempdir().unwrap();
        let policy = Policy {
            seeding: Seeding::Marker { size: 4096 },
            iterations: 3,
            steps: vec![
                Step::CreateRandom {
                    count: Count::Fixed(2),
                    max_size: 1024,
                },
                Step::AppendMarker { max_size: 1024 },
                Step::GrowRandom {
                    count: Count::UpTo(2),
                    max_size: 1024,
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(42);

        let stats = run(dir.path(), &policy, &mut rng).unwrap();

        // Marker seeded once plus two creations per iteration
        assert_eq!(stats.seeded, 1 + 2 * 3);
        assert_eq!(file_names(dir.path()).len(), 7);

        let marker = dir.path().join(MARKER_NAME);
        assert!(fs::metadata(&marker).unwrap().len() >= 4096);
    }

    #[test]
    fn test_unlink_step_preserves_marker() {
        let dir = tempfile::tempdir().unwrap();
        let policy = Policy {
            seeding: Seeding::Marker { size: 1024 },
            iterations: 3,
            steps: vec![
                Step::CreateRandom {
                    count: Count::Fixed(2),
                    max_size: 512,
                },
                Step::UnlinkRandom {
                    count: Count::Fixed(1),
                },
            ],
        };
        let mut rng = StdRng::seed_from_u64(9);

        let stats = run(dir.path(), &policy, &mut rng).unwrap();
        assert_eq!(stats.unlinked, 3);
        assert!(dir.path().join(MARKER_NAME).exists());
        // Net one surviving creation per iteration plus the marker
        assert_eq!(file_names(dir.path()).len(), 4);
    }

    #[test]
    fn test_zero_iterations_seeds_only() {
        let dir = tempfile::tempdir().unwrap();
        let policy = Policy {
            seeding: Seeding::RandomFiles {
                count: 2,
                max_size: 1024,
            },
            iterations: 0,
            steps: vec![Step::GrowRandom {
                count: Count::UpTo(5),
                max_size: 1024,
            }],
        };
        let mut rng = StdRng::seed_from_u64(1);

        let stats = run(dir.path(), &policy, &mut rng).unwrap();
        assert_eq!(stats.seeded, 2);
        assert_eq!(stats.grown, 0);
        assert_eq!(file_names(dir.path()).len(), 2);
    }
}
