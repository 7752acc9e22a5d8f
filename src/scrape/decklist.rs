// src/scrape/decklist.rs
//! Decklist parsing and concurrent resolution.
//!
//! Decklist format, one entry per line:
//! ```text
//! # Crab Dynasty
//! 3 Hida Kisada
//! Kyuden Hida
//! 2 Doji Hoturi - exp2
//! ```
//! A missing count means 1. Blank lines and `#` comments are skipped.
use std::{collections::BTreeSet, fs, path::Path, sync::LazyLock};

use regex::Regex;

use crate::card::DeckItem;
use crate::config::options::{ResolveOptions, pool_size};
use crate::core::net::Transport;
use crate::error::{OracleError, Result};
use crate::progress::{self, Progress};
use crate::scrape::{lookup::Oracle, pool::run_pool};

static ENTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]*) ?(.*)$").unwrap());

/// One eligible decklist line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckEntry {
    /// 1-based line number in the source text.
    pub line: usize,
    pub count: u32,
    pub query: String,
}

/// A decklist entry that could not be turned into a card.
#[derive(Debug)]
pub struct Unresolved {
    pub query: String,
    pub error: OracleError,
}

/// Parsed decklist: entries to look up, plus lines rejected before any lookup.
#[derive(Debug, Default)]
pub struct Decklist {
    pub entries: Vec<DeckEntry>,
    pub rejected: Vec<Unresolved>,
}

impl Decklist {
    /// Eligible lines, looked up or not.
    pub fn len(&self) -> usize {
        self.entries.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct DeckResolution {
    /// One item per eligible line, in completion order. Failed entries are
    /// present with `count == 0`.
    pub items: Vec<DeckItem>,
    /// One record per failed entry.
    pub unresolved: Vec<Unresolved>,
}

impl DeckResolution {
    pub fn resolved(&self) -> impl Iterator<Item = &DeckItem> {
        self.items.iter().filter(|i| i.is_resolved())
    }

    /// First failure that invalidates the whole batch (schema drift), if any.
    /// Items and diagnostics are complete either way.
    pub fn fatal(&self) -> Option<&OracleError> {
        self.unresolved.iter().map(|u| &u.error).find(|e| e.is_batch_fatal())
    }
}

/// Read a decklist file as UTF-8 text.
pub fn load_decklist(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Split decklist text into entries. Pure; no lookups.
///
/// A count too large for `u32` rejects the line instead of guessing.
pub fn parse_decklist(text: &str) -> Decklist {
    let mut list = Decklist::default();
    for (i, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(caps) = ENTRY.captures(line) else { continue };
        let query = caps[2].to_string();
        match parse_count(&caps[1]) {
            Some(count) => list.entries.push(DeckEntry { line: i + 1, count, query }),
            None => {
                let error = OracleError::InvalidCount { line: i + 1, count: caps[1].to_string() };
                list.rejected.push(Unresolved { query, error });
            }
        }
    }
    list
}

/// Blank and `0` mean one copy; digits past `u32::MAX` are `None`.
fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return Some(1);
    }
    match digits.parse::<u32>() {
        Ok(0) => Some(1),
        Ok(n) => Some(n),
        Err(_) => None,
    }
}

/// Parse and resolve a whole decklist.
pub fn resolve_decklist<T: Transport + 'static>(
    oracle: &Oracle<T>,
    text: &str,
    opts: &ResolveOptions,
    mut progress: Option<&mut dyn Progress>,
) -> DeckResolution {
    let list = parse_decklist(text);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{} decklist line(s), {} rejected", list.len(), list.rejected.len()));
    }

    let mut out = resolve_entries(oracle, list.entries, opts, progress::reborrow(&mut progress));
    for rejected in list.rejected {
        loge!("Decklist '{}': {}", rejected.query, rejected.error);
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Rejected '{}': {}", rejected.query, rejected.error));
        }
        out.items.push(DeckItem::unresolved());
        out.unresolved.push(rejected);
    }
    out
}

/// Resolve entries on a bounded worker pool.
///
/// Always yields exactly `entries.len()` items: a failed lookup becomes a
/// zero-count placeholder plus an `Unresolved` record and never stops the
/// other workers. Schema drift is recorded like any other failure; check
/// `DeckResolution::fatal` before trusting the statistics.
pub fn resolve_entries<T: Transport + 'static>(
    oracle: &Oracle<T>,
    entries: Vec<DeckEntry>,
    opts: &ResolveOptions,
    mut progress: Option<&mut dyn Progress>,
) -> DeckResolution {
    let total = entries.len();
    let mut out = DeckResolution::default();
    if total == 0 {
        return out;
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }
    logf!("Resolving {total} decklist entries on {} worker(s)", pool_size(opts.workers, total));

    let queries: Vec<String> = entries.iter().map(|e| e.query.clone()).collect();
    let worker_oracle = oracle.clone();
    let rx = run_pool(entries, opts.workers, move |entry| {
        worker_oracle
            .card_by_exact_name(&entry.query)
            .map(|card| DeckItem::new(entry.count, card))
    });

    let mut seen = BTreeSet::new();
    for (i, result) in rx.iter().take(total) {
        seen.insert(i);
        let query = &queries[i];
        match result {
            Ok(item) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(query);
                }
                out.items.push(item);
            }
            Err(error) => {
                fail(&mut out, &mut progress, query, error);
            }
        }
    }

    // A worker that died mid-lookup never reported; keep the one-item-per-line promise.
    if seen.len() < total {
        for (i, query) in queries.iter().enumerate().filter(|(i, _)| !seen.contains(i)) {
            let error = OracleError::transport(format!("worker stopped before entry {} finished", i + 1));
            fail(&mut out, &mut progress, query, error);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    if let Some(e) = out.fatal() {
        loge!("Decklist batch is unreliable: {e}");
    }
    out
}

fn fail(
    out: &mut DeckResolution,
    progress: &mut Option<&mut dyn Progress>,
    query: &str,
    error: OracleError,
) {
    loge!("Decklist '{query}': {error}");
    if let Some(p) = progress.as_deref_mut() {
        p.item_failed(query, &error);
    }
    out.items.push(DeckItem::unresolved());
    out.unresolved.push(Unresolved { query: s!(query), error });
}
