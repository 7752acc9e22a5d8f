// src/csv.rs
use std::io::{self, Write};

use crate::card::Card;

/// Column order for card dumps.
pub const CARD_HEADERS: [&str; 13] = [
    "Type", "Clan", "Deck", "Title", "GoldCost", "GoldProduction", "Force", "Chi",
    "FocusValue", "PersonalHonor", "HonorRequirement", "Keywords", "CardText",
];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// One dump row, in `CARD_HEADERS` order. Keywords are comma-joined.
pub fn card_row(card: &Card) -> Vec<String> {
    vec![
        card.card_type.clone(),
        card.clan.clone(),
        card.deck.label().to_string(),
        card.title.clone(),
        card.gold_cost.to_string(),
        card.gold_production.to_string(),
        card.force.to_string(),
        card.chi.to_string(),
        card.focus_value.to_string(),
        card.personal_honor.to_string(),
        card.honor_requirement.to_string(),
        card.keywords.join(","),
        card.card_text.clone(),
    ]
}

/// Header line plus one row per card.
pub fn write_cards<W: Write>(mut w: W, cards: &[Card], sep: char) -> io::Result<()> {
    write_row(&mut w, &CARD_HEADERS, sep)?;
    for card in cards {
        write_row(&mut w, &card_row(card), sep)?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::DeckType;

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["plain", "a,b", "say \"hi\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "plain,\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn card_rows_follow_headers() {
        let card = Card {
            title: s!("Iron Mine"),
            card_type: s!("Holding"),
            deck: DeckType::Dynasty,
            gold_cost: 5,
            gold_production: 2,
            keywords: vec![s!("Mine"), s!("Unique")],
            ..Card::new(9)
        };
        let row = card_row(&card);
        assert_eq!(row.len(), CARD_HEADERS.len());
        assert_eq!(row[2], "Dynasty");
        assert_eq!(row[4], "5");
        assert_eq!(row[11], "Mine,Unique");

        let mut buf = Vec::new();
        write_cards(&mut buf, &[card], ',').unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Type,Clan,Deck,Title,"));
        assert!(text.contains("Holding,,Dynasty,Iron Mine,5,2,0,0,0,0,0,\"Mine,Unique\",\n"));
    }
}
