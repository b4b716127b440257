use crate::models::{MetricValue, ParsedCell};

/// One crore in base units.
pub const CRORE: f64 = 10_000_000.0;

const CURRENCY_SYMBOLS: &[char] = &['₹'];
const THOUSANDS_SEPARATOR: char = ',';
const CRORE_SUFFIX: &str = "Cr.";

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Full precedence: `A / B` pair first, then the single-value path.
/// Empty input → `None` (nothing should be written for it).
pub fn parse_cell(s: &str) -> Option<ParsedCell> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains('/') {
        return parse_pair(s).map(|(high, low)| ParsedCell::Pair { high, low });
    }
    parse_value(s).map(ParsedCell::Single)
}

/// "₹ 3,120 / 2,050" → (Some(3120.0), Some(2050.0)), high first.
/// A half that is not a plain number comes back as `None`.
pub fn parse_pair(s: &str) -> Option<(Option<f64>, Option<f64>)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned = strip_currency(s);
    let mut halves = cleaned.split('/');
    let high = halves.next().and_then(parse_plain);
    let low = halves.next().and_then(parse_plain);
    Some((high, low))
}

/// Single-value path: currency and separators stripped, then `%`, `Cr.` or
/// plain float. Anything else is kept verbatim as `Raw`.
///
/// "12.5%" → 12.5 | "₹ 5 Cr." → 50,000,000 | "1,234" → 1234 | "--" → Raw("--")
pub fn parse_value(s: &str) -> Option<MetricValue> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned = strip_currency(s);

    let parsed = if let Some(pct) = cleaned.strip_suffix('%') {
        parse_plain(pct)
    } else if let Some(crores) = cleaned.strip_suffix(CRORE_SUFFIX) {
        parse_plain(crores).map(|v| v * CRORE)
    } else {
        parse_plain(&cleaned)
    };

    Some(match parsed {
        Some(v) => MetricValue::Parsed(v),
        None => MetricValue::Raw(s.to_string()),
    })
}

/// Numeric reading of a cell, ignoring raw-text fallbacks.
pub fn parse_number(s: &str) -> Option<f64> {
    parse_value(s).as_ref().and_then(MetricValue::as_f64)
}

fn strip_currency(s: &str) -> String {
    s.chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != THOUSANDS_SEPARATOR)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Plain float; "inf"/"NaN" spellings are rejected.
fn parse_plain(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
