//! Runtime configuration: environment variables overridden by command-line flags.
//!
//! | Variable | Flag | Default |
//! |----------|------|---------|
//! | `MATCH3_SEED` | `--seed` | `0xACE1` |
//! | `MATCH3_LEVEL` | `--level` | `1` |
//! | `MATCH3_LOG_PATH` | `--log-path` | none (logging off) |
//! | `MATCH3_LOG_LEVEL` | `--log-level` | `info` |
//!
//! Seeds accept decimal or `0x`-prefixed hex.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::core::rng::DEFAULT_SEED;

#[derive(Parser, Debug, Default, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// RNG seed (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_seed_arg)]
    pub seed: Option<u16>,

    /// Level to start at (1-based)
    #[arg(long)]
    pub level: Option<u32>,

    /// Append log records to this file
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u16,
    pub level: u32,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            level: 1,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            seed: var("MATCH3_SEED")
                .and_then(|s| parse_seed(&s))
                .unwrap_or(defaults.seed),
            level: var("MATCH3_LEVEL")
                .and_then(|s| s.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.level),
            log_path: var("MATCH3_LOG_PATH").map(PathBuf::from),
            log_level: var("MATCH3_LOG_LEVEL")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(seed) = args.seed {
            self.seed = seed;
        }
        if let Some(level) = args.level {
            self.level = level;
        }
        if let Some(path) = &args.log_path {
            self.log_path = Some(path.clone());
        }
        if let Some(level) = args.log_level {
            self.log_level = level;
        }
        self
    }
}

pub fn parse_seed(s: &str) -> Option<u16> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

fn parse_seed_arg(s: &str) -> Result<u16, String> {
    parse_seed(s).ok_or_else(|| format!("`{s}` is not a 16-bit seed"))
}
