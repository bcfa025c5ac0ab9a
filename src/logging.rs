//! File logger backing the `log` facade.
//!
//! The game owns the terminal, so log records never go to stdout/stderr.
//! When no log path is configured no logger is installed and every `log!`
//! call is a no-op.

use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct FileLogger<W: Write + Send> {
    out: Mutex<W>,
    level: LevelFilter,
    started: Instant,
}

impl<W: Write + Send> FileLogger<W> {
    pub fn new(out: W, level: LevelFilter) -> Self {
        Self {
            out: Mutex::new(out),
            level,
            started: Instant::now(),
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out.into_inner().ok()
    }
}

impl<W: Write + Send> Log for FileLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(
                out,
                "{:>9.3} {:<5} {}: {}",
                self.started.elapsed().as_secs_f64(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install the global logger if a path is configured. Returns whether one was installed.
pub fn init(path: Option<&Path>, level: LevelFilter) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    log::set_boxed_logger(Box::new(FileLogger::new(LineWriter::new(file), level)))
        .context("installing logger")?;
    log::set_max_level(level);
    log::info!("logging to {} at {}", path.display(), level);
    Ok(true)
}
