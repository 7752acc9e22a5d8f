// src/scrape/lookup.rs
//! Search-then-verify card lookups.
use std::sync::Arc;

use crate::card::Card;
use crate::config::consts::{CARD_ENDPOINT, FIELD_CARD_ID, SEARCH_ENDPOINT};
use crate::core::net::{FormFields, HttpTransport, Transport, form};
use crate::error::{OracleError, Result};
use crate::specs::{card_fields, card_page, search};

/// Handle on the Oracle site. Cheap to clone; clones share one transport.
pub struct Oracle<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for Oracle<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl Oracle<HttpTransport> {
    /// The live site over plain HTTP.
    pub fn remote() -> Self {
        Self::new(HttpTransport::default())
    }
}

impl<T: Transport> Oracle<T> {
    pub fn new(transport: T) -> Self {
        Self { transport: Arc::new(transport) }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn search(&self, fields: &FormFields) -> Result<String> {
        self.transport.fetch_page(SEARCH_ENDPOINT, fields)
    }

    /// Candidate ids for a title (and optional keyword filter), in result order.
    pub fn card_ids(&self, title: &str, keywords: Option<&str>) -> Result<Vec<u32>> {
        let doc = self.search(&search::title_form(title, keywords))?;
        let ids = search::scan_card_ids(&doc);
        logd!("Search '{}' ({:?}): {} candidate(s)", title, keywords, ids.len());
        Ok(ids)
    }

    /// Full card record for one id.
    pub fn card(&self, id: u32) -> Result<Card> {
        let doc = self
            .transport
            .fetch_page(CARD_ENDPOINT, &form([(FIELD_CARD_ID, id.to_string())]))?;
        let page = card_page::extract(&doc);
        if page.is_empty() {
            logw!("Card {id}: page had no fields");
        }
        card_fields::build_card(id, &page)
    }

    /// Resolve `"Title"` or `"Title - keywords"` to the first candidate whose
    /// title matches exactly (both sides trimmed, case-sensitive).
    ///
    /// First match wins; ties follow search order.
    pub fn card_by_exact_name(&self, query: &str) -> Result<Card> {
        let (title, keywords) = search::split_query(query);
        let wanted = title.trim();

        for id in self.card_ids(title, keywords)? {
            let card = self.card(id)?;
            if card.title.trim() == wanted {
                return Ok(card);
            }
            logd!("'{}': candidate {} is '{}', skipping", wanted, id, card.title);
        }
        Err(OracleError::CardNotFound { query: s!(query) })
    }
}
