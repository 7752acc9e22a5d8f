// src/config/options.rs
use std::time::Duration;

use super::consts::*;

/// Settings for the concurrent decklist resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Upper bound on concurrent lookups. Clamped to at least 1.
    pub workers: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { workers: WORKERS }
    }
}

impl ResolveOptions {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }
}

/// Settings for bulk enumeration / full-catalog dumps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerateOptions {
    /// Pause before each search page after the first.
    pub page_delay: Duration,
    /// Worker pool size for fetching the enumerated cards.
    pub workers: usize,
}

impl Default for EnumerateOptions {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
            workers: WORKERS,
        }
    }
}

impl EnumerateOptions {
    /// No pacing; for tests and local fixtures.
    pub fn immediate() -> Self {
        Self { page_delay: Duration::ZERO, ..Self::default() }
    }
}

pub(crate) fn pool_size(requested: usize, jobs: usize) -> usize {
    requested.min(jobs).max(1)
}
