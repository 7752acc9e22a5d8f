// tests/common/mod.rs
//
// Canned Oracle site for integration tests: card pages by id, search pages by
// title or by legality + page number.
//
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use oracle_scrape::config::consts::{
    CARD_ENDPOINT, FIELD_CARD_ID, FIELD_LEGALITY, FIELD_PAGE, FIELD_TITLE, SEARCH_ENDPOINT,
};
use oracle_scrape::core::FormFields;
use oracle_scrape::{OracleError, Result, Transport};

const DIV: &str = r#"<div class="shadowdatashadow" style="display: none;">"#;

/// Card detail page with the given label/value pairs.
pub fn card_page(fields: &[(&str, &str)]) -> String {
    let mut doc = String::from("<html><body><table>\n");
    for (label, value) in fields {
        doc.push_str(&format!("<tr><td>{DIV}{label}</div></td><td>{DIV}{value}</div></td></tr>\n"));
    }
    doc.push_str("</table></body></html>");
    doc
}

/// Minimal card page: title, type and gold cost.
pub fn simple_card(title: &str, card_type: &str, gold_cost: i32) -> String {
    card_page(&[
        ("Printed Card Title", title),
        ("Printed Card Type", card_type),
        ("Printed Gold Cost", &gold_cost.to_string()),
    ])
}

/// Search results page; each hit links its id twice, as the site does.
pub fn search_page(ids: &[u32], page: u32, pages: u32) -> String {
    let mut doc = format!("<html><body><p>Page {page} of {pages}</p>\n");
    for id in ids {
        doc.push_str(&format!(
            "<a href=\"docard?cardid={id}\"><img src=\"thumb?cardid={id}\"></a>\n"
        ));
    }
    doc.push_str("</body></html>");
    doc
}

#[derive(Default)]
pub struct FakeOracle {
    cards: HashMap<u32, String>,
    by_title: HashMap<String, String>,
    by_legality: HashMap<(String, u32), String>,
    failing_titles: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(mut self, id: u32, page: String) -> Self {
        self.cards.insert(id, page);
        self
    }

    /// Search by title returns these ids, single page.
    pub fn title(mut self, title: &str, ids: &[u32]) -> Self {
        self.by_title.insert(title.to_string(), search_page(ids, 1, 1));
        self
    }

    /// Search by title fails at the transport level.
    pub fn failing_title(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    pub fn legality_page(mut self, legality: &str, page: u32, doc: String) -> Self {
        self.by_legality.insert((legality.to_string(), page), doc);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn first<'a>(form: &'a FormFields, name: &str) -> Option<&'a str> {
    form.get(name).and_then(|v| v.first()).map(String::as_str)
}

impl Transport for FakeOracle {
    fn fetch_page(&self, endpoint: &str, form: &FormFields) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if endpoint == CARD_ENDPOINT {
            let id: u32 = first(form, FIELD_CARD_ID)
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| OracleError::transport("bad card id"))?;
            return self
                .cards
                .get(&id)
                .cloned()
                .ok_or_else(|| OracleError::transport(format!("HTTP 404 for card {id}")));
        }

        assert_eq!(endpoint, SEARCH_ENDPOINT, "unexpected endpoint");

        if let Some(title) = first(form, FIELD_TITLE) {
            if self.failing_titles.contains(title) {
                return Err(OracleError::transport(format!("connection reset ({title})")));
            }
            return Ok(self
                .by_title
                .get(title)
                .cloned()
                .unwrap_or_else(|| search_page(&[], 1, 1)));
        }

        if let Some(legality) = first(form, FIELD_LEGALITY) {
            let page = first(form, FIELD_PAGE).and_then(|p| p.parse().ok()).unwrap_or(1);
            return self
                .by_legality
                .get(&(legality.to_string(), page))
                .cloned()
                .ok_or_else(|| OracleError::transport(format!("no listing page {page}")));
        }

        Err(OracleError::transport("empty search form"))
    }
}
