// src/card.rs
//! Card records as read from the Oracle, and deck entries built from them.
use std::fmt;

use serde::Serialize;

/// Which deck a card belongs to, derived from its printed type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DeckType {
    Dynasty,
    Fate,
    StartsInPlay,
    Token,
    /// Type string not in the lookup table.
    #[default]
    Unspecified,
}

impl DeckType {
    /// Fixed printed-type → deck mapping. Unknown types pass through as `Unspecified`.
    pub fn from_card_type(card_type: &str) -> Self {
        match card_type {
            "Strategy" | "Item" | "Spell" | "Ring" | "Follower" => DeckType::Fate,
            "Holding" | "Personality" | "Event" => DeckType::Dynasty,
            "Stronghold" | "Sensei" => DeckType::StartsInPlay,
            _ => DeckType::Unspecified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeckType::Dynasty => "Dynasty",
            DeckType::Fate => "Fate",
            DeckType::StartsInPlay => "Starts in play",
            DeckType::Token => "Token",
            DeckType::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: u32,
    pub card_number: i32,
    pub title: String,
    pub card_type: String,
    pub deck: DeckType,
    pub keywords: Vec<String>,
    pub card_text: String,
    /// 0 = no printed cost.
    pub gold_cost: i32,
    /// 0..=5, only meaningful for Fate cards.
    pub focus_value: i32,
    pub set: Vec<String>,
    pub legality: Vec<String>,
    pub personal_honor: i32,
    pub honor_requirement: i32,
    pub flavor_text: String,
    pub artist: String,
    pub rarity: String,
    pub clan: String,
    pub force: i32,
    pub chi: i32,
    pub notes: String,
    pub storyline_credit: String,
    pub province_strength: i32,
    pub gold_production: i32,
    pub starting_family_honor: i32,
    pub erratum: String,
    pub mrp: String,
    pub image_location: String,
}

impl Card {
    pub fn new(id: u32) -> Self {
        Self { id, ..Self::default() }
    }
}

/// One decklist entry after resolution.
///
/// `count == 0` marks an entry that could not be resolved; it is kept so the
/// item list lines up one-to-one with the decklist, and statistics skip it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeckItem {
    pub count: u32,
    pub card: Card,
}

impl DeckItem {
    pub fn new(count: u32, card: Card) -> Self {
        Self { count, card }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_lookup_covers_known_types() {
        assert_eq!(DeckType::from_card_type("Follower"), DeckType::Fate);
        assert_eq!(DeckType::from_card_type("Holding"), DeckType::Dynasty);
        assert_eq!(DeckType::from_card_type("Sensei"), DeckType::StartsInPlay);
    }

    #[test]
    fn unknown_type_is_unspecified_and_case_sensitive() {
        assert_eq!(DeckType::from_card_type("Wind"), DeckType::Unspecified);
        assert_eq!(DeckType::from_card_type("strategy"), DeckType::Unspecified);
        assert_eq!(DeckType::default(), DeckType::Unspecified);
    }

    #[test]
    fn sentinel_item_is_unresolved() {
        assert!(!DeckItem::unresolved().is_resolved());
        assert!(DeckItem::new(3, Card::new(7)).is_resolved());
    }
}
