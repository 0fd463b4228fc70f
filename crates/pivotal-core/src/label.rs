// File: crates/pivotal-core/src/label.rs
// Summary: Ordered category/group label used as pivot row and column keys.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

use crate::table::Cell;

/// Category or group value.
/// Natural order: integers, dates, timestamps, then text; each ascending.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Int(i64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Text(String),
}

impl Label {
    /// Parse free text with the CSV cell typing rules, so user-supplied labels
    /// match the keys a loaded table produces.
    pub fn parse(raw: &str) -> Self {
        Cell::parse(raw).to_label().unwrap_or_else(|| Label::Text(String::new()))
    }

    /// Label for a numeric key. Integral values stay integers so they sort numerically.
    pub fn from_number(v: f64) -> Self {
        if v.fract() == 0.0 && v.abs() < 9.0e15 {
            Label::Int(v as i64)
        } else {
            Label::Text(v.to_string())
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{i}"),
            Label::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Label::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self { Label::Int(v) }
}

impl From<i32> for Label {
    fn from(v: i32) -> Self { Label::Int(v as i64) }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self { Label::Text(v.to_string()) }
}

impl From<String> for Label {
    fn from(v: String) -> Self { Label::Text(v) }
}

impl From<NaiveDate> for Label {
    fn from(v: NaiveDate) -> Self { Label::Date(v) }
}

impl From<NaiveDateTime> for Label {
    fn from(v: NaiveDateTime) -> Self { Label::DateTime(v) }
}
