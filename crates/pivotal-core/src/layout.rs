// File: crates/pivotal-core/src/layout.rs
// Summary: Data-space geometry for standard, stacked and clustered bars, and line points.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::pivot::Pivot;
use crate::series::BarRect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarLayout {
    /// One bar per category; only valid for a single series.
    Standard,
    #[default]
    Stacked,
    /// Series side by side inside the category slot.
    Clustered,
}

impl BarLayout {
    pub fn name(&self) -> &'static str {
        match self {
            BarLayout::Standard => "standard",
            BarLayout::Stacked => "stacked",
            BarLayout::Clustered => "clustered",
        }
    }
}

impl fmt::Display for BarLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for BarLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(BarLayout::Standard),
            "stacked" => Ok(BarLayout::Stacked),
            "clustered" => Ok(BarLayout::Clustered),
            other => Err(Error::Layout(format!("unknown bar layout `{other}`"))),
        }
    }
}

fn check_width(width: f64) -> Result<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(Error::Layout(format!("bar width must be positive, got {width}")))
    }
}

/// Signum with sign(0) = 0, so empty segments add no spacing.
fn sign(v: f64) -> f64 {
    if v > 0.0 { 1.0 } else if v < 0.0 { -1.0 } else { 0.0 }
}

/// Bars of `column`, each centred on its category slot.
pub fn standard_bars(pivot: &Pivot, column: usize, width: f64) -> Result<Vec<BarRect>> {
    check_width(width)?;
    let half = width / 2.0;
    Ok(pivot
        .column_values(column)
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let c = i as f64;
            BarRect { category: i, c0: c - half, c1: c + half, v0: 0.0, v1: v }
        })
        .collect())
}

/// Side-by-side bars, one `Vec` per pivot column. The cluster of `k` bars spans
/// `width` around the slot centre: `bar_width = (width - space*(k-1)) / k`.
pub fn clustered_bars(pivot: &Pivot, width: f64, space: f64) -> Result<Vec<Vec<BarRect>>> {
    check_width(width)?;
    if space < 0.0 {
        return Err(Error::Layout(format!("bar space must be non-negative, got {space}")));
    }
    if space >= width {
        return Err(Error::Layout(format!("bar space {space} must be smaller than width {width}")));
    }
    let k = pivot.num_columns().max(1);
    let bar_width = (width - space * (k as f64 - 1.0)) / k as f64;
    if bar_width <= 0.0 {
        return Err(Error::Layout(format!(
            "{k} series do not fit into width {width} with space {space}"
        )));
    }

    Ok((0..pivot.num_columns())
        .map(|col| {
            let offset = -width / 2.0 + col as f64 * (bar_width + space);
            pivot
                .column_values(col)
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    let c0 = i as f64 + offset;
                    BarRect { category: i, c0, c1: c0 + bar_width, v0: 0.0, v1: v }
                })
                .collect()
        })
        .collect())
}

/// Stacked segments, one `Vec` per pivot column. Each category keeps a running
/// baseline; after a segment it moves by `v + sign(v) * space * max_abs_row_total`.
pub fn stacked_bars(pivot: &Pivot, width: f64, space: f64) -> Result<Vec<Vec<BarRect>>> {
    check_width(width)?;
    let gap = space * pivot.max_abs_row_total();
    let half = width / 2.0;
    let mut base = vec![0.0; pivot.num_rows()];

    Ok((0..pivot.num_columns())
        .map(|col| {
            pivot
                .column_values(col)
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    let v0 = base[i];
                    base[i] += v + sign(v) * gap;
                    let c = i as f64;
                    BarRect { category: i, c0: c - half, c1: c + half, v0, v1: v0 + v }
                })
                .collect()
        })
        .collect())
}

/// `(category position, value)` for one pivot column.
pub fn line_points(pivot: &Pivot, column: usize) -> Vec<(f64, f64)> {
    pivot
        .column_values(column)
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v))
        .collect()
}
