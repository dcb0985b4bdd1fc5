// Copyright (c) 2025, Joe Drago <joedrago@gmail.com>
// SPDX-License-Identifier: BSD-2-Clause

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::error::Result;

/// Line-buffered debug logger. Disabled (a no-op) unless a log path was
/// given on the command line.
pub struct Logger {
    writer: Option<Mutex<BufWriter<File>>>,
}

impl Logger {
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let writer = path
            .map(|p| {
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(p)
            })
            .transpose()?
            .map(|file| Mutex::new(BufWriter::new(file)));

        Ok(Logger { writer })
    }

    pub fn log(&self, msg: &str) {
        if let Some(ref writer) = self.writer {
            if let Ok(mut w) = writer.lock() {
                let _ = writeln!(w, "[{}] {}", timestamp(), msg);
                let _ = w.flush();
            }
        }
    }
}

// Simple seconds.millis timestamp without a chrono dependency
fn timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

/// Global logger instance
static LOGGER: std::sync::OnceLock<Logger> = std::sync::OnceLock::new();

pub fn init_logger(path: Option<&Path>) -> Result<()> {
    let logger = Logger::new(path)?;
    LOGGER.get_or_init(|| logger);
    Ok(())
}

pub fn log_debug(msg: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(msg);
    }
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logger::log_debug(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logger_is_noop() {
        let logger = Logger::new(None).unwrap();
        logger.log("nothing to do");
    }

    #[test]
    fn test_logger_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let logger = Logger::new(Some(&path)).unwrap();
        logger.log("first");
        logger.log("second");

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }
}
