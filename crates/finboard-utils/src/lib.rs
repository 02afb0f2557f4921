//! Utility functions and helpers

/// Format a number with a fixed number of fraction digits and thousands grouping.
///
/// `format_grouped(1234567.891, 2, ".", ",")` gives `"1.234.567,89"`.
pub fn format_grouped(n: f64, decimals: usize, thousands_sep: &str, decimal_sep: &str) -> String {
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(thousands_sep);
        }
        grouped.push(c);
    }

    let mut result = String::new();
    // "-0,00" is kept for tiny negatives, same as the browser's Intl formatter
    if n.is_sign_negative() && n != 0.0 {
        result.push('-');
    }
    result.push_str(&grouped);
    if let Some(frac) = frac_part {
        result.push_str(decimal_sep);
        result.push_str(frac);
    }
    result
}

/// Escape text for use inside HTML element content and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Split a raw `application/x-www-form-urlencoded` query into ordered pairs.
///
/// Repeated keys are kept, which `Query<HashMap<..>>` would collapse.
pub fn parse_query_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Percent-encode one URL path segment or query value
pub fn encode_component(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|c| c.into_owned())
        .unwrap_or(spaced)
}
