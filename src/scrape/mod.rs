// src/scrape/mod.rs
//! Everything that talks to the Oracle: single lookups, paginated listings,
//! and the worker pool that fans lookups out.
pub mod decklist;
pub mod enumerate;
pub mod lookup;
mod pool;

pub use decklist::{DeckEntry, DeckResolution, Decklist, Unresolved, parse_decklist, resolve_decklist};
pub use enumerate::{CardBatch, all_card_ids, dump_legality, fetch_cards};
pub use lookup::Oracle;
