// src/progress.rs
use crate::error::OracleError;

/// Lightweight progress reporting used by long-running operations
/// (decklist resolution, catalog dumps). Frontends implement this to surface
/// status to users. Called from the collecting thread only.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit completed (a decklist entry resolved, a card fetched).
    fn item_done(&mut self, _label: &str) {}

    /// One unit failed; the batch carries on.
    fn item_failed(&mut self, _label: &str, _err: &OracleError) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Reborrow an optional sink for a nested call, leaving the caller's usable.
pub fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    match progress {
        Some(p) => {
            let p: &'a mut dyn Progress = &mut **p;
            Some(p)
        }
        None => None,
    }
}
