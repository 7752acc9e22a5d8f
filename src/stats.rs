// src/stats.rs
//! Deck statistics over resolved items.
//!
//! Every summary skips placeholder items (`count == 0`) and is independent of
//! item order: sums commute, and the running averages below give the same
//! result for any order up to float rounding.
use std::{collections::{BTreeMap, HashMap}, fmt};

use serde::Serialize;

use crate::card::{DeckItem, DeckType};

pub const FOCUS_BUCKETS: usize = 6;

/// Weighted running average: fold `value` with `weight` into an average that
/// already carries `prior_weight`. The denominator is summed in `f64`.
pub fn weighted_running_avg(average: f64, prior_weight: u64, value: i32, weight: u64) -> f64 {
    let (prior, w) = (prior_weight as f64, weight as f64);
    (f64::from(value) * w + average * prior) / (prior + w)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

/// Keyword tally weighted by copies, highest first. Equal counts keep the
/// order in which each keyword was first seen.
pub fn count_keywords(items: &[DeckItem]) -> Vec<KeywordCount> {
    let mut order: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items.iter().filter(|i| i.is_resolved()) {
        for kw in &item.card.keywords {
            match index.get(kw.as_str()) {
                Some(&ix) => order[ix].count += u64::from(item.count),
                None => {
                    index.insert(kw.as_str(), order.len());
                    order.push(KeywordCount { keyword: kw.clone(), count: u64::from(item.count) });
                }
            }
        }
    }

    order.sort_by(|a, b| b.count.cmp(&a.count)); // stable
    order
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FocusStats {
    pub average: f64,
    /// Copies of Fate cards seen.
    pub card_count: u64,
    /// Copies per printed focus value 0..=5.
    pub distribution: [u64; FOCUS_BUCKETS],
}

/// Focus values of Fate cards only.
pub fn focus_distribution(items: &[DeckItem]) -> FocusStats {
    let mut stats = FocusStats::default();
    for item in items.iter().filter(|i| i.is_resolved() && i.card.deck == DeckType::Fate) {
        let (fv, n) = (item.card.focus_value, u64::from(item.count));
        stats.average = weighted_running_avg(stats.average, stats.card_count, fv, n);
        stats.card_count += n;
        match usize::try_from(fv).ok().filter(|&b| b < FOCUS_BUCKETS) {
            Some(bucket) => stats.distribution[bucket] += n,
            None => logw!("'{}': focus value {fv} outside 0..=5", item.card.title),
        }
    }
    stats
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckGoldCost {
    pub deck: DeckType,
    /// Average over costed cards only.
    pub average: f64,
    /// Every copy of this deck type, costed or not.
    pub card_count: u64,
    /// Copies behind `average` (gold cost > 0).
    pub total_weight: u64,
    /// Gold cost → copies.
    pub distribution: BTreeMap<i32, u64>,
}

impl DeckGoldCost {
    fn new(deck: DeckType) -> Self {
        Self { deck, average: 0.0, card_count: 0, total_weight: 0, distribution: BTreeMap::new() }
    }

    fn add(&mut self, gold_cost: i32, count: u64) {
        self.card_count += count;
        if gold_cost > 0 {
            self.average = weighted_running_avg(self.average, self.total_weight, gold_cost, count);
            self.total_weight += count;
            *self.distribution.entry(gold_cost).or_default() += count;
        }
    }
}

/// Gold cost summary per deck type. Zero-cost cards count toward
/// `card_count` but leave `average` and `total_weight` alone.
pub fn gold_cost_by_deck(items: &[DeckItem]) -> BTreeMap<DeckType, DeckGoldCost> {
    let mut out: BTreeMap<DeckType, DeckGoldCost> = BTreeMap::new();
    for item in items.iter().filter(|i| i.is_resolved()) {
        out.entry(item.card.deck)
            .or_insert_with(|| DeckGoldCost::new(item.card.deck))
            .add(item.card.gold_cost, u64::from(item.count));
    }
    out
}

/// A quotient that may have had nothing to divide. `NaN` when undefined.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ratio(pub f64);

impl Ratio {
    pub fn of(num: i64, den: i64) -> Self {
        Ratio(num as f64 / den as f64)
    }

    pub fn is_defined(self) -> bool {
        self.0.is_finite()
    }

    pub fn value(self) -> Option<f64> {
        self.is_defined().then_some(self.0)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{v:.3}"),
            None => f.write_str("n/a"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoldProduction {
    /// Σ gold production × copies, over cards with production and cost.
    pub total_gp: i64,
    /// Copies of those producing cards.
    pub total_holdings: u64,
    /// Σ cost × copies / total_gp, same cards.
    pub normalized_cost: Ratio,
    /// Σ force × copies / Σ cost × copies, over cards with force and cost.
    pub fg_ratio: Ratio,
}

pub fn gold_production(items: &[DeckItem]) -> GoldProduction {
    let (mut total_gp, mut gp_cost, mut holdings) = (0i64, 0i64, 0u64);
    let (mut total_force, mut force_cost) = (0i64, 0i64);

    for item in items.iter().filter(|i| i.is_resolved()) {
        let c = &item.card;
        let n = i64::from(item.count);
        if c.gold_production > 0 && c.gold_cost > 0 {
            total_gp += i64::from(c.gold_production) * n;
            gp_cost += i64::from(c.gold_cost) * n;
            holdings += u64::from(item.count);
        }
        if c.force > 0 && c.gold_cost > 0 {
            total_force += i64::from(c.force) * n;
            force_cost += i64::from(c.gold_cost) * n;
        }
    }

    GoldProduction {
        total_gp,
        total_holdings: holdings,
        normalized_cost: Ratio::of(gp_cost, total_gp),
        fg_ratio: Ratio::of(total_force, force_cost),
    }
}

/// All four summaries for one deck.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckStats {
    pub keywords: Vec<KeywordCount>,
    pub focus: FocusStats,
    pub gold_costs: BTreeMap<DeckType, DeckGoldCost>,
    pub gold_production: GoldProduction,
}

impl DeckStats {
    pub fn compute(items: &[DeckItem]) -> Self {
        Self {
            keywords: count_keywords(items),
            focus: focus_distribution(items),
            gold_costs: gold_cost_by_deck(items),
            gold_production: gold_production(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;

    #[test]
    fn running_average_single_step() {
        assert_eq!(weighted_running_avg(0.0, 0, 4, 2), 4.0);
        assert_eq!(weighted_running_avg(2.0, 1, 4, 3), 3.5);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let card = Card {
            title: s!("Ambush"),
            deck: DeckType::Fate,
            focus_value: 2,
            gold_cost: 4,
            keywords: vec![s!("Battle")],
            ..Card::new(1)
        };
        let items = vec![
            DeckItem::new(3_000_000_000, card.clone()),
            DeckItem::new(3_000_000_000, card),
        ];

        assert_eq!(count_keywords(&items)[0].count, 6_000_000_000);

        let focus = focus_distribution(&items);
        assert_eq!(focus.card_count, 6_000_000_000);
        assert_eq!(focus.distribution[2], 6_000_000_000);
        assert_eq!(focus.average, 2.0);

        let costs = gold_cost_by_deck(&items);
        let fate = &costs[&DeckType::Fate];
        assert_eq!(fate.total_weight, 6_000_000_000);
        assert_eq!(fate.average, 4.0);
    }

    #[test]
    fn ratio_display() {
        assert_eq!(Ratio::of(1, 2).to_string(), "0.500");
        assert_eq!(Ratio::of(0, 0).to_string(), "n/a");
        assert_eq!(Ratio::of(0, 5).value(), Some(0.0));
        assert!(!Ratio::of(0, 0).is_defined());
    }
}
