// src/core/time.rs

use std::sync::LazyLock;

use regex::Regex;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(\d{1,3})\s*:\s*)?(\d{1,4})(?:\.\s*(\d{1,2})?)?\s*$").unwrap()
});

/// Parse a swim time into seconds.
///
/// Accepts `27.80`, `1:08.79`, `2:15,5`, and the quote notations found in
/// CADDA documents: `38"51` (38.51 s), `1'05"32` (1 min 5.32 s) and
/// `36'00"` (36.00 s). Blank cells and dashes are `None`.
///
/// One fractional digit means tenths, two mean hundredths. The value is built
/// from whole hundredths so `1:08.79` is exactly `68.79`.
pub fn parse_time_to_seconds(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || matches!(s, "-" | "—" | "–") {
        return None;
    }

    let s = s
        .replace('″', "\"")
        .replace(['’', '´', '′'], "'")
        .replace(',', ".");
    let s = if s.contains(':') { s } else { unquote(&s) };

    let caps = TIME_RE.captures(&s)?;
    let mm: u64 = caps.get(1).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let ss: u64 = caps.get(2)?.as_str().parse().ok()?;
    let frac: u64 = match caps.get(3) {
        Some(c) if c.as_str().len() == 1 => c.as_str().parse::<u64>().ok()? * 10,
        Some(c) => c.as_str().parse().ok()?,
        None => 0,
    };

    let hundredths = mm
        .checked_mul(6000)?
        .checked_add(ss.checked_mul(100)?)?
        .checked_add(frac)?;
    Some(hundredths as f64 / 100.0)
}

/// Rewrite quote notation into `m:ss.cc` / `ss.cc`.
fn unquote(s: &str) -> String {
    if let Some((a, rest)) = s.split_once('\'') {
        let rest = rest.trim();
        return match rest.split_once('"') {
            // ss'cc"
            Some((b, c)) if c.trim().is_empty() => format!("{a}.{b}"),
            // m'ss"cc
            Some((b, c)) => format!("{a}:{b}.{}", c.trim()),
            // ss'cc
            None => format!("{a}.{rest}"),
        };
    }
    match s.split_once('"') {
        Some((a, b)) => format!("{a}.{}", b.trim_end_matches('"')),
        None => s.to_string(),
    }
}
