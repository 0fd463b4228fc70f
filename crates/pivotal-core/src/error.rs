// File: crates/pivotal-core/src/error.rs
// Summary: Error type shared by the table, pivot, measures and chart layers.

use crate::label::Label;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("columns not found in table: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("invalid aggregation function: {0}")]
    InvalidAggFunc(String),

    #[error("limit must be greater than 0")]
    InvalidLimit,

    #[error("invalid limit spec '{0}', expected 'top:N' or 'bottom:N'")]
    InvalidLimitSpec(String),

    #[error("invalid sort spec '{0}', expected 'asc|desc:label|value' or a label list")]
    InvalidSortSpec(String),

    #[error("labels not found in {axis}: {labels:?}")]
    UnknownLabels { axis: &'static str, labels: Vec<Label> },

    #[error("column '{column}' row {row}: expected a date, found {found}")]
    NotADate { column: String, row: usize, found: String },

    #[error("data must contain at least 2 different years for YoY, found {0:?}")]
    NotEnoughYears(Vec<i32>),

    #[error("year {year} not found; available years: {available:?}")]
    YearNotFound { year: i32, available: Vec<i32> },

    #[error("invalid chart layout: {0}")]
    Layout(String),

    #[error("table row has {got} cells but the table has {want} columns")]
    RowWidth { want: usize, got: usize },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
