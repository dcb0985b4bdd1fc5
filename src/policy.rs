// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::{Config, Mode};

/// How many files a step touches in one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(u64),
    /// Drawn fresh each iteration from [0, n)
    UpTo(u64),
}

impl Count {
    pub fn draw(&self, rng: &mut StdRng) -> u64 {
        match self {
            Count::Fixed(n) => *n,
            Count::UpTo(n) => rng.random_range(0..*n),
        }
    }
}

/// One per-iteration operation. All size bounds are exclusive and must
/// be nonzero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Create `count` new randomly named files sized in [0, max_size)
    CreateRandom { count: Count, max_size: u64 },
    /// Append [0, max_size) bytes to the marker file
    AppendMarker { max_size: u64 },
    /// Grow `count` existing files by [0, max_size) bytes each
    GrowRandom { count: Count, max_size: u64 },
    /// Unlink `count` files; the marker file is always exempt
    UnlinkRandom { count: Count },
}

/// Seeding performed once before the iteration loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seeding {
    /// `count` randomly named files sized in [0, max_size)
    RandomFiles { count: u64, max_size: u64 },
    /// The `fragmented` marker file at an exact size
    Marker { size: u64 },
}

/// A full run description: one seeding phase, then `iterations` passes
/// over `steps`. Both built-in policies share this shape; they differ
/// only in the numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub seeding: Seeding,
    pub iterations: u64,
    pub steps: Vec<Step>,
}

impl Policy {
    /// Seed ten files of up to 2 GiB, then grow a handful of them by
    /// under 1 MB, ten thousand times over.
    pub fn replicate() -> Self {
        Policy {
            seeding: Seeding::RandomFiles {
                count: 10,
                max_size: 2_147_483_647,
            },
            iterations: 10_000,
            steps: vec![Step::GrowRandom {
                count: Count::UpTo(10),
                max_size: 1_050_000,
            }],
        }
    }

    /// One large `fragmented` marker file, grown by big appends while
    /// small files churn around it.
    pub fn grow() -> Self {
        Policy {
            seeding: Seeding::Marker {
                size: 1_050_000_000,
            },
            iterations: 100,
            steps: vec![
                Step::CreateRandom {
                    count: Count::Fixed(2),
                    max_size: 5_240_000,
                },
                Step::AppendMarker {
                    max_size: 105_000_000,
                },
                Step::GrowRandom {
                    count: Count::UpTo(5),
                    max_size: 10_500_000,
                },
            ],
        }
    }

    /// Resolve the policy for a validated config: the mode's built-in
    /// numbers, plus any iteration override and optional unlink churn.
    pub fn for_config(config: &Config) -> Self {
        let mut policy = match config.mode {
            Mode::Replicate => Policy::replicate(),
            Mode::Grow => Policy::grow(),
        };

        if let Some(iterations) = config.iterations {
            policy.iterations = iterations;
        }
        if let Some(unlink) = config.unlink {
            policy.steps.push(Step::UnlinkRandom {
                count: Count::UpTo(unlink),
            });
        }

        policy
    }
}
