// src/scrape/enumerate.rs
//! Full-catalog listings: page through a legality search, then fetch every card.
use std::thread;

use crate::card::Card;
use crate::config::options::EnumerateOptions;
use crate::core::net::Transport;
use crate::error::{OracleError, Result};
use crate::progress::{self, Progress};
use crate::scrape::{lookup::Oracle, pool::run_pool};
use crate::specs::search;

/// Every card id listed for `legality`, page by page.
///
/// Ids are collapsed per page only; an id that straddles a page boundary is
/// kept twice. A missing page marker is fatal: the walk cannot know where to stop.
pub fn all_card_ids<T: Transport>(
    oracle: &Oracle<T>,
    legality: &str,
    opts: &EnumerateOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<u32>> {
    let first = oracle.search(&search::legality_form(legality, None))?;
    let pages = match search::page_count(&first) {
        Ok(n) => n,
        Err(e) => {
            loge!("Listing '{legality}': no page marker in first response");
            return Err(e);
        }
    };
    logf!("Listing '{legality}': {pages} page(s)");

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Listing '{legality}': {pages} page(s)"));
        p.begin(pages as usize);
    }

    let mut ids = Vec::new();
    for page in 1..=pages {
        let ids_page = if page == 1 {
            search::scan_card_ids(&first)
        } else {
            thread::sleep(opts.page_delay); // be polite
            let doc = oracle.search(&search::legality_form(legality, Some(page)))?;
            search::scan_card_ids(&doc)
        };
        logd!("Listing '{legality}' page {page}: {} id(s)", ids_page.len());
        ids.extend(ids_page);

        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&format!("page {page}/{pages}"));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(ids)
}

/// Cards fetched in bulk, plus the ids that failed.
#[derive(Debug, Default)]
pub struct CardBatch {
    pub cards: Vec<Card>,
    pub failed: Vec<(u32, OracleError)>,
}

impl CardBatch {
    /// First failure that invalidates the whole batch (schema drift), if any.
    pub fn fatal(&self) -> Option<&OracleError> {
        self.failed.iter().map(|(_, e)| e).find(|e| e.is_batch_fatal())
    }
}

/// Fetch every id on the worker pool. Results are returned sorted by id.
///
/// Every failure lands in `failed`. Schema drift does not stop the other
/// workers; check `CardBatch::fatal` before trusting the cards.
pub fn fetch_cards<T: Transport + 'static>(
    oracle: &Oracle<T>,
    ids: Vec<u32>,
    opts: &EnumerateOptions,
    mut progress: Option<&mut dyn Progress>,
) -> CardBatch {
    let total = ids.len();
    let mut batch = CardBatch::default();
    if total == 0 {
        return batch;
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let worker_oracle = oracle.clone();
    let rx = run_pool(ids, opts.workers, move |id| (*id, worker_oracle.card(*id)));

    for (_, (id, result)) in rx.iter().take(total) {
        match result {
            Ok(card) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&card.title);
                }
                batch.cards.push(card);
            }
            Err(e) => {
                loge!("Card {id}: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&id.to_string(), &e);
                }
                batch.failed.push((id, e));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    if let Some(e) = batch.fatal() {
        loge!("Card batch is unreliable: {e}");
    }

    batch.cards.sort_by_key(|c| c.id);
    batch
}

/// Enumerate a legality and fetch all of its cards.
pub fn dump_legality<T: Transport + 'static>(
    oracle: &Oracle<T>,
    legality: &str,
    opts: &EnumerateOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<CardBatch> {
    let ids = all_card_ids(oracle, legality, opts, progress::reborrow(&mut progress))?;
    logf!("Listing '{legality}': fetching {} card(s)", ids.len());
    Ok(fetch_cards(oracle, ids, opts, progress))
}
