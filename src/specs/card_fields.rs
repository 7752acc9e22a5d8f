// src/specs/card_fields.rs
//! Label dictionary: card-page label → `Card` field.
//!
//! Labels come from a page schema we do not control, so the table is the one
//! place to audit when the site changes. Anything not listed is `SchemaDrift`.
use std::sync::LazyLock;

use regex::Regex;

use crate::card::{Card, DeckType};
use crate::core::html::table_cells;
use crate::core::sanitize::collapse_line_breaks;
use crate::error::{OracleError, Result};
use crate::specs::card_page::{CardPage, Field};

pub const LIST_SEP: &str = " • ";

pub const LABEL_HR_GC_PH: &str =
    r#"<span title="Honor Requirement, Gold Cost, Personal Honor">Printed HR/GC/PH</span>"#;
pub const LABEL_PS_GP_SH: &str =
    r#"<span title="Province Strength, Gold Production, Starting Family Honor">Printed PS/GP/SH</span>"#;

static PRODUCE_GOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Produce (\d+) Gold.").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Text { Title, FlavorText, Artist, Notes, StorylineCredit, Erratum, Mrp, Rarity, Clan }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Int {
    CardNumber, GoldCost, FocusValue, HonorRequirement, PersonalHonor,
    Force, Chi, ProvinceStrength, GoldProduction, StartingFamilyHonor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum List { Keywords, Legality, Set }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Handler {
    /// Plain text, stored as-is.
    Verbatim(Text),
    /// Trimmed integer; blanks and junk read as 0.
    Int(Int),
    /// Split on `LIST_SEP`.
    Split(List),
    /// First two `<td>` cells, all-or-nothing.
    Pair([Int; 2]),
    /// First three `<td>` cells, all-or-nothing.
    Triple([Int; 3]),
    /// Card text, plus gold production when the text states it.
    PrintedText,
    /// Raw type label plus the derived deck.
    CardType,
}

static FIELDS: &[(&str, Handler)] = &[
    ("Printed Text", Handler::PrintedText),
    ("Printed Focus Value", Handler::Int(Int::FocusValue)),
    ("Printed Gold Cost", Handler::Int(Int::GoldCost)),
    ("Printed Card Title", Handler::Verbatim(Text::Title)),
    ("Printed Card Type", Handler::CardType),
    ("Printed Keywords", Handler::Split(List::Keywords)),
    ("Legality", Handler::Split(List::Legality)),
    ("Set", Handler::Split(List::Set)),
    (LABEL_HR_GC_PH, Handler::Triple([Int::HonorRequirement, Int::GoldCost, Int::PersonalHonor])),
    ("Printed Force/Chi", Handler::Pair([Int::Force, Int::Chi])),
    (LABEL_PS_GP_SH, Handler::Triple([Int::ProvinceStrength, Int::GoldProduction, Int::StartingFamilyHonor])),
    ("Printed Flavor Text", Handler::Verbatim(Text::FlavorText)),
    ("Printed Artist", Handler::Verbatim(Text::Artist)),
    ("Notes", Handler::Verbatim(Text::Notes)),
    ("Printed Storyline Credit", Handler::Verbatim(Text::StorylineCredit)),
    ("Erratum", Handler::Verbatim(Text::Erratum)),
    ("MRP", Handler::Verbatim(Text::Mrp)),
    ("Rarity", Handler::Verbatim(Text::Rarity)),
    ("Printed Clan", Handler::Verbatim(Text::Clan)),
    ("Card Number", Handler::Int(Int::CardNumber)),
];

fn handler_for(label: &str) -> Option<Handler> {
    FIELDS.iter().find(|(l, _)| *l == label).map(|(_, h)| *h)
}

/// Fold an extracted page into a `Card`. Fields apply in page order, so a
/// later field may overwrite an earlier one (PS/GP/SH after Printed Text).
pub fn build_card(id: u32, page: &CardPage) -> Result<Card> {
    let mut card = Card::new(id);
    if let Some(img) = &page.image_location {
        card.image_location = img.clone();
    }
    for field in &page.fields {
        let Some(handler) = handler_for(&field.label) else {
            loge!("Card {id}: unknown field label '{}'", field.label);
            return Err(OracleError::SchemaDrift { label: field.label.clone() });
        };
        apply(&mut card, handler, field);
    }
    Ok(card)
}

fn apply(card: &mut Card, handler: Handler, field: &Field) {
    match handler {
        Handler::Verbatim(t) => *text_slot(card, t) = field.value.clone(),
        Handler::Int(i) => *int_slot(card, i) = parse_int(&field.value),
        Handler::Split(l) => *list_slot(card, l) = split_list(&field.value),
        Handler::Pair(slots) => {
            if let Some(vals) = packed::<2>(&field.raw) {
                assign(card, &slots, &vals);
            }
        }
        Handler::Triple(slots) => {
            if let Some(vals) = packed::<3>(&field.raw) {
                assign(card, &slots, &vals);
            }
        }
        Handler::PrintedText => {
            card.card_text = collapse_line_breaks(&field.value);
            if let Some(gp) = produced_gold(&card.card_text) {
                card.gold_production = gp;
            }
        }
        Handler::CardType => {
            card.card_type = field.value.clone();
            card.deck = DeckType::from_card_type(&field.value);
        }
    }
}

fn assign(card: &mut Card, slots: &[Int], vals: &[i32]) {
    for (slot, v) in slots.iter().zip(vals) {
        *int_slot(card, *slot) = *v;
    }
}

fn text_slot(card: &mut Card, t: Text) -> &mut String {
    match t {
        Text::Title => &mut card.title,
        Text::FlavorText => &mut card.flavor_text,
        Text::Artist => &mut card.artist,
        Text::Notes => &mut card.notes,
        Text::StorylineCredit => &mut card.storyline_credit,
        Text::Erratum => &mut card.erratum,
        Text::Mrp => &mut card.mrp,
        Text::Rarity => &mut card.rarity,
        Text::Clan => &mut card.clan,
    }
}

fn int_slot(card: &mut Card, i: Int) -> &mut i32 {
    match i {
        Int::CardNumber => &mut card.card_number,
        Int::GoldCost => &mut card.gold_cost,
        Int::FocusValue => &mut card.focus_value,
        Int::HonorRequirement => &mut card.honor_requirement,
        Int::PersonalHonor => &mut card.personal_honor,
        Int::Force => &mut card.force,
        Int::Chi => &mut card.chi,
        Int::ProvinceStrength => &mut card.province_strength,
        Int::GoldProduction => &mut card.gold_production,
        Int::StartingFamilyHonor => &mut card.starting_family_honor,
    }
}

fn list_slot(card: &mut Card, l: List) -> &mut Vec<String> {
    match l {
        List::Keywords => &mut card.keywords,
        List::Legality => &mut card.legality,
        List::Set => &mut card.set,
    }
}

fn parse_int(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(LIST_SEP).map(str::to_string).collect()
}

/// First `N` table cells as integers, or `None` when the table is short.
pub fn packed<const N: usize>(raw: &str) -> Option<[i32; N]> {
    let cells = table_cells(raw);
    if cells.len() < N {
        return None;
    }
    let mut out = [0; N];
    for (slot, cell) in out.iter_mut().zip(&cells) {
        *slot = parse_int(cell);
    }
    Some(out)
}

/// `... Produce 2 Gold. ...` → 2
pub fn produced_gold(text: &str) -> Option<i32> {
    PRODUCE_GOLD.captures(text).and_then(|c| c[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(label: &str, value: &str) -> Field {
        Field { label: s!(label), raw: s!(value), value: s!(value) }
    }

    fn packed_field(label: &str, cells: &[&str]) -> Field {
        let raw: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        Field { label: s!(label), raw: format!("<table><tr>{raw}</tr></table>"), value: cells.concat() }
    }

    fn card_from(fields: Vec<Field>) -> Result<Card> {
        build_card(1, &CardPage { fields, image_location: None })
    }

    #[test]
    fn every_label_in_table_is_unique() {
        for (i, (a, _)) in FIELDS.iter().enumerate() {
            assert!(FIELDS[i + 1..].iter().all(|(b, _)| a != b), "duplicate label {a}");
        }
    }

    #[test]
    fn text_and_int_fields() {
        let card = card_from(vec![
            field("Printed Card Title", "Hida Kisada"),
            field("Printed Gold Cost", " 9 "),
            field("Card Number", "12\n"),
            field("Printed Clan", "Crab"),
        ])
        .unwrap();
        assert_eq!(card.title, "Hida Kisada");
        assert_eq!(card.gold_cost, 9);
        assert_eq!(card.card_number, 12);
        assert_eq!(card.clan, "Crab");
    }

    #[test]
    fn blank_numbers_read_as_zero() {
        let card = card_from(vec![field("Printed Focus Value", "")]).unwrap();
        assert_eq!(card.focus_value, 0);
    }

    #[test]
    fn card_type_sets_deck() {
        let card = card_from(vec![field("Printed Card Type", "Strategy")]).unwrap();
        assert_eq!(card.card_type, "Strategy");
        assert_eq!(card.deck, DeckType::Fate);

        let odd = card_from(vec![field("Printed Card Type", "Wind")]).unwrap();
        assert_eq!(odd.card_type, "Wind");
        assert_eq!(odd.deck, DeckType::Unspecified);
    }

    #[test]
    fn lists_split_on_bullet() {
        let card = card_from(vec![field("Printed Keywords", "Samurai • Cavalry • Unique")]).unwrap();
        assert_eq!(card.keywords, ["Samurai", "Cavalry", "Unique"]);
    }

    #[test]
    fn printed_text_collapses_breaks_and_reads_gold() {
        let card = card_from(vec![field("Printed Text", "Bow:\r\nProduce 3 Gold.")]).unwrap();
        assert_eq!(card.card_text, "Bow:  Produce 3 Gold.");
        assert_eq!(card.gold_production, 3);
    }

    #[test]
    fn hr_gc_ph_triple() {
        let card = card_from(vec![packed_field(LABEL_HR_GC_PH, &["4", "6", "2"])]).unwrap();
        assert_eq!((card.honor_requirement, card.gold_cost, card.personal_honor), (4, 6, 2));
    }

    #[test]
    fn short_triple_assigns_nothing() {
        let card = card_from(vec![
            field("Printed Gold Cost", "5"),
            packed_field(LABEL_HR_GC_PH, &["4", "6"]),
        ])
        .unwrap();
        assert_eq!(card.gold_cost, 5);
        assert_eq!(card.honor_requirement, 0);
        assert_eq!(card.personal_honor, 0);
    }

    #[test]
    fn force_chi_pair() {
        let card = card_from(vec![packed_field("Printed Force/Chi", &["3", "2"])]).unwrap();
        assert_eq!((card.force, card.chi), (3, 2));
    }

    #[test]
    fn table_gold_production_overwrites_text() {
        let card = card_from(vec![
            field("Printed Text", "Produce 2 Gold."),
            packed_field(LABEL_PS_GP_SH, &["8", "5", "6"]),
        ])
        .unwrap();
        assert_eq!(card.gold_production, 5);
        assert_eq!(card.province_strength, 8);
        assert_eq!(card.starting_family_honor, 6);
    }

    #[test]
    fn unknown_label_is_schema_drift() {
        let err = card_from(vec![field("Printed Mana Cost", "3")]).unwrap_err();
        assert!(matches!(err, OracleError::SchemaDrift { ref label } if label == "Printed Mana Cost"));
    }

    #[test]
    fn empty_page_is_bare_card() {
        let page = CardPage { fields: vec![], image_location: Some(s!("showimage?x")) };
        let card = build_card(42, &page).unwrap();
        assert_eq!(card.id, 42);
        assert_eq!(card.image_location, "showimage?x");
        assert!(card.title.is_empty());
    }
}
