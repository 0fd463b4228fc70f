// File: crates/pivotal-core/src/limit.rs
// Summary: Top/bottom-N category limiting by row total.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::pivot::Pivot;

/// Keep the N categories with the largest (`Top`) or smallest (`Bottom`) row total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Limit {
    Top(usize),
    Bottom(usize),
}

impl Limit {
    pub fn n(&self) -> usize {
        match *self {
            Limit::Top(n) | Limit::Bottom(n) => n,
        }
    }

    /// Rank rows by total and keep at most N, in ranking order.
    /// Ties keep the incoming row order.
    pub fn apply(&self, pivot: &Pivot) -> Result<Pivot> {
        let n = self.n();
        if n == 0 {
            return Err(Error::InvalidLimit);
        }
        let totals = pivot.row_totals();
        let mut order: Vec<usize> = (0..pivot.num_rows()).collect();
        match self {
            Limit::Top(_) => order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a])),
            Limit::Bottom(_) => order.sort_by(|&a, &b| totals[a].total_cmp(&totals[b])),
        }
        order.truncate(n);
        debug!(limit = %self, kept = order.len(), of = pivot.num_rows(), "limit applied");
        Ok(pivot.select_rows(&order))
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Top(n) => write!(f, "top:{n}"),
            Limit::Bottom(n) => write!(f, "bottom:{n}"),
        }
    }
}

impl FromStr for Limit {
    type Err = Error;

    /// Accepts `top:N` / `bottom:N` (also with a space instead of the colon).
    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::InvalidLimitSpec(s.to_string());
        let (by, n) = s.trim().split_once([':', ' ']).ok_or_else(bad)?;
        let n: usize = n.trim().parse().map_err(|_| bad())?;
        let limit = match by.trim().to_ascii_lowercase().as_str() {
            "top" => Limit::Top(n),
            "bottom" => Limit::Bottom(n),
            _ => return Err(bad()),
        };
        if n == 0 {
            return Err(Error::InvalidLimit);
        }
        Ok(limit)
    }
}

impl TryFrom<String> for Limit {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}
