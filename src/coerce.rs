//! Column kinds and their builtin value preprocessors.
//!
//! Each preprocessor turns a raw [`CellValue`] into a [`SortKey`] the
//! registry's comparators can order. The semantics here are load-bearing
//! compatibility contracts: hosts migrated datasets against these exact
//! rules (a lone `-` means zero, an empty currency cell sorts *before*
//! `$0.00`, a percentage range keeps only its lower bound), so every
//! function is pure, deterministic, and never panics on malformed input.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::value::{CellValue, SortKey};

/// The comparator kind attached to a column.
///
/// The builtin kinds cover the legacy datasets this library was written
/// for; `Custom` carries any kind name registered by the host at startup.
/// `Default` (and any kind missing from the registry) means "let the
/// render engine compare with its own string/numeric default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Render engine's default string/numeric comparison.
    Default,
    /// Money strings like `$1,234.56`; empty sorts before `$0.00`.
    Currency,
    /// Decimal-comma numbers like `1,5`.
    NumericComma,
    /// Integer wrapped in an anchor tag, e.g. `<a href="#">42</a>`.
    UrlNumeric,
    /// `M-YYYY` month/year strings compared as timestamps.
    MonthYear,
    /// Percentages, possibly ranges like `5-10%` (lower bound wins).
    PercentageRange,
    /// A host-registered kind.
    Custom(String),
}

impl ColumnKind {
    /// The registry key for this kind.
    pub fn name(&self) -> &str {
        match self {
            ColumnKind::Default => "default",
            ColumnKind::Currency => "currency",
            ColumnKind::NumericComma => "numeric-comma",
            ColumnKind::UrlNumeric => "url-numeric",
            ColumnKind::MonthYear => "month-year",
            ColumnKind::PercentageRange => "percentage-range",
            ColumnKind::Custom(name) => name,
        }
    }

    /// Parse a kind name. Unknown names become [`ColumnKind::Custom`] and
    /// are resolved (or explicitly fall back) at config-build time.
    pub fn parse(name: &str) -> ColumnKind {
        match name {
            "default" => ColumnKind::Default,
            "currency" => ColumnKind::Currency,
            "numeric-comma" => ColumnKind::NumericComma,
            "url-numeric" => ColumnKind::UrlNumeric,
            "month-year" => ColumnKind::MonthYear,
            "percentage-range" => ColumnKind::PercentageRange,
            other => ColumnKind::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Prefix parsing
// =============================================================================

/// Parse the longest numeric prefix of `input`, after leading whitespace.
///
/// Mirrors the lenient parser legacy datasets were normalized against:
/// `"1.5abc"` is `1.5`, `"5."` is `5.0`, and an input with no numeric
/// prefix at all (including a bare `-`) is NaN.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return f64::NAN;
    }
    let mut end = i;
    // An exponent only counts when at least one digit follows it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            end = j;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the longest base-10 integer prefix of `input`, after leading
/// whitespace. Returns `None` when no digits are present.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return None;
    }
    s[..i].parse().ok()
}

// =============================================================================
// Builtin preprocessors
// =============================================================================

/// `currency`: empty cells sort before `$0.00`, a lone `-` (with or
/// without a currency symbol) is zero, everything else keeps only digits,
/// minus, and decimal point before parsing.
pub fn currency(value: &CellValue) -> SortKey {
    match value {
        CellValue::Null => SortKey::ABSENT,
        CellValue::Number(n) => SortKey::new(*n),
        CellValue::Text(s) if s.is_empty() => SortKey::ABSENT,
        CellValue::Text(s) => {
            let stripped: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
                .collect();
            if stripped == "-" {
                SortKey::new(0.0)
            } else {
                SortKey::new(parse_float_prefix(&stripped))
            }
        }
    }
}

/// `numeric-comma`: a lone `-` is zero; otherwise the first comma becomes
/// a decimal point and the result is parsed as a float.
pub fn numeric_comma(value: &CellValue) -> SortKey {
    match value {
        CellValue::Null => SortKey::new(f64::NAN),
        CellValue::Number(n) => SortKey::new(*n),
        CellValue::Text(s) if s == "-" => SortKey::new(0.0),
        CellValue::Text(s) => SortKey::new(parse_float_prefix(&s.replacen(',', ".", 1))),
    }
}

fn anchor_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<a[^>]*>(.*?)</a>").expect("Invalid anchor regex"))
}

/// `url-numeric`: the integer between the first `<a ...>` and `</a>`.
/// Missing anchor, empty anchor text, or an unparsable number all map
/// to zero.
pub fn url_numeric(value: &CellValue) -> SortKey {
    let text = match value {
        CellValue::Text(s) => s.as_str(),
        CellValue::Number(n) => return SortKey::new(*n),
        CellValue::Null => return SortKey::new(0.0),
    };
    let inner = anchor_text_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("");
    match parse_int_prefix(inner) {
        Some(n) => SortKey::new(n as f64),
        None => SortKey::new(0.0),
    }
}

/// `month-year`: `M-YYYY` strings become the UTC millisecond timestamp of
/// the first of that month. Malformed input is NaN, which the total order
/// places before every parseable date.
pub fn month_year(value: &CellValue) -> SortKey {
    let CellValue::Text(s) = value else {
        return SortKey::new(f64::NAN);
    };
    let millis = NaiveDate::parse_from_str(&format!("1-{s}"), "%d-%m-%Y")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis() as f64);
    SortKey::new(millis.unwrap_or(f64::NAN))
}

/// `percentage-range`: empty cells sort before `0%`; a range like `5-10%`
/// keeps only the part before the first `-`; a trailing `%` is stripped.
/// Non-text, non-null cells map to zero (legacy rule, kept as-is).
pub fn percentage_range(value: &CellValue) -> SortKey {
    match value {
        CellValue::Null => SortKey::ABSENT,
        CellValue::Text(s) if s.is_empty() => SortKey::ABSENT,
        CellValue::Text(s) => {
            let head = match s.find('-') {
                Some(idx) => &s[..idx],
                None => s.as_str(),
            };
            SortKey::new(parse_float_prefix(&head.replacen('%', "", 1)))
        }
        CellValue::Number(_) => SortKey::new(0.0),
    }
}
