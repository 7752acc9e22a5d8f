// src/specs/search.rs
//! Search form shaping and search-results parsing (`dosearch`).
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{FIELD_KEYWORDS, FIELD_LEGALITY, FIELD_PAGE, FIELD_TITLE};
use crate::core::net::{FormFields, form};
use crate::core::sanitize::escape_html;
use crate::error::{OracleError, Result};

/// Separator between title and keyword filter in a card query.
pub const QUERY_SEP: &str = " - ";

static CARD_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"cardid=(\d+)").unwrap());
static PAGE_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"of (\d+)").unwrap());
static EXP_ABBREV: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"exp(\d+)?").unwrap());

/// Card ids in page order, with back-to-back repeats collapsed.
///
/// Each hit is rendered twice in a row (thumbnail + link); a later, separate
/// mention of the same id is kept.
pub fn scan_card_ids(doc: &str) -> Vec<u32> {
    let mut ids: Vec<u32> = CARD_ID
        .captures_iter(doc)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    ids.dedup();
    ids
}

/// Total page count from the "Page 1 of N" marker.
pub fn page_count(doc: &str) -> Result<u32> {
    PAGE_COUNT
        .captures(doc)
        .and_then(|c| c[1].trim().parse().ok())
        .ok_or(OracleError::PaginationParse)
}

/// `exp` / `exp2` → `Experienced ` / `Experienced 2` (deckbuilder shorthand).
pub fn expand_keyword_abbrev(keywords: &str) -> String {
    EXP_ABBREV.replace_all(keywords, "Experienced ${1}").into_owned()
}

/// `"Title - keywords"` → (`"Title"`, `Some("keywords")`). Segments after the
/// second are ignored.
pub fn split_query(query: &str) -> (&str, Option<&str>) {
    let mut parts = query.split(QUERY_SEP);
    let title = parts.next().unwrap_or("");
    (title, parts.next())
}

/// Form for a title search, optionally narrowed by keywords.
pub fn title_form(title: &str, keywords: Option<&str>) -> FormFields {
    let mut fields = form([(FIELD_TITLE, escape_html(title))]);
    if let Some(kw) = keywords.filter(|k| !k.is_empty()) {
        fields.insert(s!(FIELD_KEYWORDS), vec![expand_keyword_abbrev(kw)]);
    }
    fields
}

/// Form for one page of a legality listing. Page 1 omits the page field.
pub fn legality_form(legality: &str, page: Option<u32>) -> FormFields {
    let mut fields = form([(FIELD_LEGALITY, escape_html(legality))]);
    if let Some(p) = page {
        fields.insert(s!(FIELD_PAGE), vec![p.to_string()]);
    }
    fields
}
