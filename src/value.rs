//! Cell values and the comparable keys derived from them.

use serde::{Deserialize, Serialize};

/// A dynamic cell value as supplied by the host dataset.
///
/// Cells arrive as raw text (possibly containing markup fragments),
/// numbers, or nothing at all. The view never owns an authoritative copy;
/// every reconciliation re-reads the host's rows in full.
///
/// # Example
///
/// ```
/// use steadytable::value::CellValue;
///
/// let price = CellValue::from("$19.99");
/// let count = CellValue::from(42.0);
/// let empty = CellValue::Null;
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent/null cell.
    Null,
    /// Numeric cell.
    Number(f64),
    /// Textual cell, possibly containing markup.
    Text(String),
}

/// A single table row: one cell per column, in column order.
pub type Row = Vec<CellValue>;

impl CellValue {
    /// Returns `true` if this is a null cell.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A comparable key produced by a column-kind preprocessor.
///
/// Wraps an `f64` with a *total* order so sorting stays stable even when a
/// preprocessor could not parse its input: NaN sorts below every other
/// value, and in particular below [`SortKey::ABSENT`] (`-1.0`), the
/// sentinel used for empty cells.
#[derive(Debug, Clone, Copy)]
pub struct SortKey(f64);

impl SortKey {
    /// Sentinel for absent/empty cells. Sorts before any real value,
    /// so an unset currency cell orders before `$0.00`.
    pub const ABSENT: SortKey = SortKey(-1.0);

    /// Wrap a raw comparable value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The underlying value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns `true` if the preprocessor failed to parse its input.
    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            // Neither side is NaN, so partial_cmp cannot fail.
            (false, false) => self.0.partial_cmp(&other.0).unwrap_or(std::cmp::Ordering::Equal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_only_for_text_cells() {
        assert_eq!(CellValue::from("abc").as_text(), Some("abc"));
        assert_eq!(CellValue::Number(1.0).as_text(), None);
        assert_eq!(CellValue::Null.as_text(), None);
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(CellValue::from(None::<f64>), CellValue::Null);
        assert_eq!(CellValue::from(Some(2i64)), CellValue::Number(2.0));
        assert!(CellValue::from(None::<&str>).is_null());
    }
}
