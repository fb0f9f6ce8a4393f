use std::str::FromStr;

use chrono::{DateTime, Utc};
use csv::StringRecord;

/// A record type that maps to one row of a backing CSV file.
///
/// The column order is positional and versioned by `HEADER`: decode reads
/// fields by index, not by name, so new columns may only ever be appended.
pub trait TableRecord: Sized {
    /// Column names, written once as the first line of an empty backing file.
    const HEADER: &'static [&'static str];
    /// Rows with fewer fields than this are treated as malformed and skipped.
    const MIN_FIELDS: usize;

    fn to_row(&self) -> Vec<String>;

    /// Best-effort decode. Returns `None` only for rows below `MIN_FIELDS`;
    /// individual unparseable fields fall back to their default values.
    fn from_row(row: &StringRecord) -> Option<Self>;
}

pub(crate) fn text(row: &StringRecord, idx: usize) -> String {
    row.get(idx).unwrap_or_default().to_string()
}

pub(crate) fn number<T: FromStr + Default>(row: &StringRecord, idx: usize) -> T {
    row.get(idx).and_then(|s| s.parse().ok()).unwrap_or_default()
}

pub(crate) fn timestamp(row: &StringRecord, idx: usize) -> DateTime<Utc> {
    row.get(idx)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

/// An empty field is absent, never a parsed zero. A present-but-unparseable
/// field still decodes to `Some(0.0)`, matching `number`'s fallback.
pub(crate) fn optional_number(row: &StringRecord, idx: usize) -> Option<f64> {
    match row.get(idx) {
        None | Some("") => None,
        Some(s) => Some(s.parse().unwrap_or_default()),
    }
}
