// src/specs/card_page.rs
//! Field extraction for the card detail page (`docard`).
//!
//! The page renders every attribute as two hidden "shadow data" divs in a row:
//! the first holds the label, the second the value.
//!
//! ```html
//! <div class="shadowdatashadow" style="display: none;">Printed Gold Cost</div>
//! <div class="shadowdatashadow" style="display: none;">3</div>
//! ```
use std::sync::LazyLock;

use regex::Regex;

use crate::core::html::strip_tags;
use crate::core::sanitize::{replace_nbsp, unescape_entities};

static SHADOW_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"<div class="shadowdatashadow" style="display: none;">([^&].*?)</div>"#,
        r#".*?"#,
        r#"<div class="shadowdatashadow" style="display: none;">(.*?)</div>"#,
    ))
    .unwrap()
});

static GOLD_ICON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img class="inlinebutton" src="[^"]*?/icon-cards-small/g_(\d+)\.png"\s*/?>"#)
        .unwrap()
});

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img .*? src="(showimage\?.*?)">"#).unwrap());

/// One labeled attribute from the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Entity-decoded label. May still carry markup (the packed-table labels do).
    pub label: String,
    /// Value HTML with gold icons replaced by their digits; used for table cells.
    pub raw: String,
    /// Plain-text value.
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardPage {
    pub fields: Vec<Field>,
    pub image_location: Option<String>,
}

impl CardPage {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Read all label/value pairs, in page order, plus the card image reference.
pub fn extract(doc: &str) -> CardPage {
    let fields = SHADOW_PAIR
        .captures_iter(doc)
        .map(|c| {
            let label = unescape_entities(&replace_nbsp(&c[1]));
            let raw = replace_gold_icons(&replace_nbsp(&c[2]));
            let value = strip_tags(&unescape_entities(&raw));
            Field { label, raw, value }
        })
        .collect();

    CardPage { fields, image_location: image_location(doc) }
}

/// `<img ... g_3.png />` → `3`, so packed numbers survive tag stripping.
pub fn replace_gold_icons(s: &str) -> String {
    GOLD_ICON.replace_all(s, "${1}").into_owned()
}

pub fn image_location(doc: &str) -> Option<String> {
    IMAGE.captures(doc).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIV: &str = r#"<div class="shadowdatashadow" style="display: none;">"#;

    fn pair(label: &str, value: &str) -> String {
        format!("<tr>{DIV}{label}</div></td><td>{DIV}{value}</div></tr>\n")
    }

    #[test]
    fn pairs_come_back_in_page_order() {
        let doc = pair("Printed Card Title", "Doji Hoturi") + &pair("Printed Gold Cost", "7");
        let page = extract(&doc);
        let labels: Vec<_> = page.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["Printed Card Title", "Printed Gold Cost"]);
        assert_eq!(page.fields[1].value, "7");
    }

    #[test]
    fn nbsp_and_entities_are_normalized() {
        let doc = pair("Printed&nbsp;Artist", "Bob&nbsp;&amp;&nbsp;Jane");
        let page = extract(&doc);
        assert_eq!(page.fields[0].label, "Printed Artist");
        assert_eq!(page.fields[0].value, "Bob & Jane");
    }

    #[test]
    fn accented_title_is_decoded() {
        let page = extract(&pair("Printed Card Title", "Tsuru&oacute; &Eacute;lite"));
        assert_eq!(page.fields[0].value, "Tsuruó Élite");
    }

    #[test]
    fn gold_icon_becomes_its_digits() {
        let icon = r#"<img class="inlinebutton" src="/oracle/resources/icon-cards-small/g_4.png" />"#;
        let doc = pair("Printed Text", &format!("<b>Limited:</b> Pay {icon} to draw."));
        let page = extract(&doc);
        assert_eq!(page.fields[0].value, "Limited: Pay 4 to draw.");
        assert!(page.fields[0].raw.contains("Pay 4 to"));
    }

    #[test]
    fn labels_starting_with_entity_are_skipped() {
        let doc = pair("&nbsp;", "spacer") + &pair("Rarity", "Rare");
        let page = extract(&doc);
        assert_eq!(page.fields.len(), 1);
        assert_eq!(page.fields[0].value, "Rare");
    }

    #[test]
    fn no_structure_is_empty_not_error() {
        let page = extract("<html><body>Nothing here</body></html>");
        assert!(page.is_empty());
        assert_eq!(page.image_location, None);
    }

    #[test]
    fn image_location_found() {
        let doc = r#"<img class="cardimage" src="showimage?cardid=123&size=large">"#;
        assert_eq!(image_location(doc).as_deref(), Some("showimage?cardid=123&size=large"));
    }
}
