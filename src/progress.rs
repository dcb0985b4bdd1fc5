// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::time::Duration;

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Counters accumulated across one run, reported once at the end
#[derive(Debug, Default, Clone)]
pub struct RunStats {
    /// Files created (seeds and per-iteration creations)
    pub seeded: u64,
    /// Append operations performed (named files and the marker)
    pub grown: u64,
    /// Files deleted
    pub unlinked: u64,
    /// Total payload bytes requested across all writes
    pub bytes: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStats {
    pub fn summary(&self) -> String {
        let secs = self.elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            format!(" ({}/s)", human_bytes((self.bytes as f64 / secs) as u64))
        } else {
            String::new()
        };
        format!(
            "Done: {} seeded, {} grown, {} unlinked, {} in {}{}",
            self.seeded,
            self.grown,
            self.unlinked,
            human_bytes(self.bytes),
            human_duration(self.elapsed.as_secs()),
            rate,
        )
    }
}

/// Decimal byte units; exact below 1 KB, one decimal place above
pub fn human_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Two coarsest nonzero fields: h/m, m/s, or bare seconds
pub fn human_duration(seconds: u64) -> String {
    match (seconds / 3600, (seconds % 3600) / 60, seconds % 60) {
        (0, 0, s) => format!("{}s", s),
        (0, m, s) => format!("{}m{}s", m, s),
        (h, m, _) => format!("{}h{}m", h, m),
    }
}
