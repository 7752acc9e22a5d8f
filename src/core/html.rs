// src/core/html.rs
// Tag-level helpers. Patterns are non-greedy and line-bound, matching how the
// Oracle pages put each tag on one line.
use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::normalize_ws;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static TD_CELL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<td.*?>(.*?)</td>").unwrap());

/// Remove every `<...>` tag, leaving text and whitespace as they were.
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

/// Remove tags, then collapse whitespace.
pub fn strip_tags_ws(s: &str) -> String {
    normalize_ws(&strip_tags(s))
}

/// Inner text of each `<td>` cell in document order, tags stripped, trimmed.
pub fn table_cells(s: &str) -> Vec<String> {
    TD_CELL
        .captures_iter(s)
        .map(|c| strip_tags_ws(&c[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_but_keeps_spacing() {
        assert_eq!(strip_tags("<b>Bold</b>  <i>x</i>"), "Bold  x");
        assert_eq!(strip_tags("3 < 4"), "3 < 4");
    }

    #[test]
    fn cells_in_order() {
        let row = r#"<table><tr><td class="a"> 2 </td><td>5</td><td><b>1</b></td></tr></table>"#;
        assert_eq!(table_cells(row), vec!["2", "5", "1"]);
    }

    #[test]
    fn no_cells_is_empty() {
        assert!(table_cells("plain text").is_empty());
    }
}
