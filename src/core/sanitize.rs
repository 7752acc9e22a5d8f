// src/core/sanitize.rs

/// Replace `&nbsp;` markers with plain spaces (before any other decoding).
pub fn replace_nbsp(s: &str) -> String {
    s.replace("&nbsp;", " ")
}

/// Decode HTML character references: the full HTML5 named set plus decimal
/// and hex numeric forms. Unknown references are kept verbatim.
pub fn unescape_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

/// Escape the five HTML-significant characters, as the search form expects.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Turn each `\n` / `\r` into a single space (no other whitespace changes).
pub fn collapse_line_breaks(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
