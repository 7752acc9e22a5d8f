// src/specs/mod.rs
//! # Page "specs"
//!
//! Each spec here knows how to read one kind of Oracle page and nothing else.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the card detail page (`docard`) and the search
//!   results page (`dosearch`).
//! - **The label dictionary** that maps card-page labels onto `Card` fields.
//! - **Form shaping** for search requests (field names, keyword shorthand).
//!
//! ## What does **not** live here
//! - **Networking.** Callers hand in page bodies; `scrape` owns the transport.
//! - **Concurrency, retries, pacing.** See `scrape::decklist` / `scrape::enumerate`.
//! - **Statistics or output formatting.**
//!
//! ## Typical call chain
//! ```text
//! scrape::lookup::Oracle ──fetch──▶ specs::search::scan_card_ids
//!                        ──fetch──▶ specs::card_page::extract ─▶ specs::card_fields::build_card
//! ```
//!
//! ## Conventions & invariants
//! - A page with no recognizable structure parses to an *empty* result, not an error.
//! - An unknown card-page label is an error (`SchemaDrift`): the dictionary is stale.
//! - Specs are testable offline against captured page fixtures.
pub mod card_fields;
pub mod card_page;
pub mod search;
