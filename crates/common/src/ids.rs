//! Path id parsing
//!
//! Record ids arrive as raw path segments. Parsing is lenient: surrounding
//! whitespace and a sign are accepted, and only the leading run of digits
//! counts, so `"12abc"` is `12`. Anything without leading digits has no id.

/// Parse a path segment into a record id, or `None` when no digits lead it.
pub fn parse_lenient_id(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
