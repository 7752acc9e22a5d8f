// src/report.rs
//! Plain-text deck report for terminals.
use std::fmt::Write;

use crate::stats::DeckStats;

const RULE: &str = "-----------";

const BAR_MAX: u64 = 60;

/// One `+` per copy; long bars are cut and labeled with the real count.
fn bar(n: u64) -> String {
    if n <= BAR_MAX {
        "+".repeat(n as usize)
    } else {
        format!("{}… ({n})", "+".repeat(BAR_MAX as usize))
    }
}

pub fn render(stats: &DeckStats) -> String {
    let mut out = s!();
    let gp = &stats.gold_production;

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Gold Production Statistics:");
    let _ = writeln!(
        out,
        "Total GP: {}, Normalized Cost: {}, Total Holdings: {}",
        gp.total_gp, gp.normalized_cost, gp.total_holdings
    );
    let _ = writeln!(out, "Force/Gold Ratio: {}", gp.fg_ratio);

    let _ = writeln!(out, "{RULE}");
    for (deck, gc) in &stats.gold_costs {
        let _ = writeln!(out, "Deck: {deck}");
        let _ = writeln!(out, "Avg GC: {:.2} Card Count: {}", gc.average, gc.card_count);
        for (cost, n) in &gc.distribution {
            let _ = writeln!(out, "\t{cost}: {}", bar(*n));
        }
    }

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Average Focus Value: {:.2}", stats.focus.average);
    for (fv, n) in stats.focus.distribution.iter().enumerate() {
        let _ = writeln!(out, "{fv}: {}", bar(*n));
    }

    let _ = writeln!(out, "{RULE}");
    for kw in &stats.keywords {
        let _ = writeln!(out, "{}: {}", kw.keyword, kw.count);
    }
    out
}
