use unicode_width::UnicodeWidthStr;

/// Display width of a cell in terminal columns
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Parse a cell as a number, requiring the whole (trimmed) string to parse.
/// NaN is rejected so comparisons stay well-ordered.
pub fn parse_number(s: &str) -> Option<f64> {
    let n: f64 = s.trim().parse().ok()?;
    if n.is_nan() {
        None
    } else {
        Some(n)
    }
}
