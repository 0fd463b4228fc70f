// File: crates/pivotal-core/src/aggregate.rs
// Summary: Aggregation functions and the group-by/pivot core.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::label::Label;
use crate::pivot::Pivot;
use crate::table::{Cell, Table};

/// Reduction applied to the value cells of one (category, group) bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum AggFunc {
    #[default]
    Sum,
    Mean,
    Count,
    Min,
    Max,
    /// Sample standard deviation (ddof = 1).
    Std,
    Median,
    NUnique,
}

impl AggFunc {
    pub const ALL: [AggFunc; 8] = [
        AggFunc::Sum,
        AggFunc::Mean,
        AggFunc::Count,
        AggFunc::Min,
        AggFunc::Max,
        AggFunc::Std,
        AggFunc::Median,
        AggFunc::NUnique,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Count => "count",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Std => "std",
            AggFunc::Median => "median",
            AggFunc::NUnique => "nunique",
        }
    }

    /// Reduce a bucket. Undefined results (empty mean, single-value std) are 0.
    pub(crate) fn apply(&self, bucket: &Bucket) -> f64 {
        let xs = &bucket.numbers;
        match self {
            AggFunc::Sum => xs.iter().sum(),
            AggFunc::Count => bucket.non_null as f64,
            AggFunc::NUnique => bucket.distinct.len() as f64,
            _ if xs.is_empty() => 0.0,
            AggFunc::Mean => xs.iter().sum::<f64>() / xs.len() as f64,
            AggFunc::Min => xs.iter().copied().fold(f64::INFINITY, f64::min),
            AggFunc::Max => xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            AggFunc::Std => {
                if xs.len() < 2 {
                    return 0.0;
                }
                let n = xs.len() as f64;
                let mean = xs.iter().sum::<f64>() / n;
                let ss: f64 = xs.iter().map(|x| (x - mean) * (x - mean)).sum();
                (ss / (n - 1.0)).sqrt()
            }
            AggFunc::Median => {
                let mut v = xs.clone();
                v.sort_by(f64::total_cmp);
                let mid = v.len() / 2;
                if v.len() % 2 == 0 { (v[mid - 1] + v[mid]) / 2.0 } else { v[mid] }
            }
        }
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for AggFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        AggFunc::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| Error::InvalidAggFunc(s.to_string()))
    }
}

impl TryFrom<String> for AggFunc {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> { s.parse() }
}

/// Value cells collected for one (category, group) pair.
#[derive(Debug, Default)]
pub(crate) struct Bucket {
    numbers: Vec<f64>,
    non_null: usize,
    distinct: BTreeSet<Label>,
}

impl Bucket {
    fn push(&mut self, cell: &Cell, agg: AggFunc) {
        if cell.is_null() {
            return;
        }
        self.non_null += 1;
        if let Some(n) = cell.as_number() {
            self.numbers.push(n);
        }
        if agg == AggFunc::NUnique {
            if let Some(l) = cell.to_label() {
                self.distinct.insert(l);
            }
        }
    }
}

/// Grouped reduction: distinct row keys, distinct column keys, and the reduced buckets.
pub(crate) struct Grouped {
    pub rows: Vec<Label>,
    pub columns: Vec<Label>,
    pub values: BTreeMap<(Label, Label), f64>,
}

/// Group `(row, column, value)` triples and reduce each bucket with `agg`.
/// Keys come out in natural label order.
pub(crate) fn group_aggregate<'a>(
    triples: impl IntoIterator<Item = (Label, Label, &'a Cell)>,
    agg: AggFunc,
) -> Grouped {
    let mut buckets: BTreeMap<(Label, Label), Bucket> = BTreeMap::new();
    let mut rows = BTreeSet::new();
    let mut columns = BTreeSet::new();
    for (row, col, cell) in triples {
        rows.insert(row.clone());
        columns.insert(col.clone());
        buckets.entry((row, col)).or_default().push(cell, agg);
    }
    let values = buckets.into_iter().map(|(k, b)| (k, agg.apply(&b))).collect();
    Grouped { rows: rows.into_iter().collect(), columns: columns.into_iter().collect(), values }
}

/// Pivot `table`: rows keyed by `index`, columns by `columns` (or a single column named
/// after `values`), cells reduced with `agg`. Absent combinations are filled with 0.
/// Rows whose index or group cell is null are skipped.
pub fn pivot_table(
    table: &Table,
    index: &str,
    values: &str,
    columns: Option<&str>,
    agg: AggFunc,
) -> Result<Pivot> {
    let mut required = vec![index, values];
    required.extend(columns);
    table.require(&required)?;

    let idx = table.column(index)?;
    let val = table.column(values)?;
    let grp = columns.map(|c| table.column(c)).transpose()?;
    let value_label = Label::Text(values.to_string());

    let triples = (0..table.num_rows()).filter_map(|i| {
        let row = idx[i].to_label()?;
        let col = match grp {
            Some(g) => g[i].to_label()?,
            None => value_label.clone(),
        };
        Some((row, col, &val[i]))
    });
    let mut grouped = group_aggregate(triples, agg);
    if grp.is_none() && grouped.columns.is_empty() {
        grouped.columns.push(value_label);
    }

    let cells: Vec<Vec<f64>> = grouped
        .rows
        .iter()
        .map(|r| {
            grouped
                .columns
                .iter()
                .map(|c| grouped.values.get(&(r.clone(), c.clone())).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    debug!(
        rows = table.num_rows(),
        categories = grouped.rows.len(),
        groups = grouped.columns.len(),
        agg = %agg,
        "pivot built"
    );
    Ok(Pivot::from_dense(grouped.rows, grouped.columns, cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sales() -> Table {
        Table::from_rows(
            ["region", "product", "units"],
            [
                ["north", "a", "1"],
                ["north", "b", "4"],
                ["south", "a", "2"],
                ["north", "a", "3"],
                ["east", "b", ""],
            ]
            .into_iter()
            .map(|r| r.into_iter().map(Cell::parse).collect::<Vec<_>>()),
        )
        .unwrap()
    }

    fn agg_of(xs: &[f64], agg: AggFunc) -> f64 {
        let cells: Vec<Cell> = xs.iter().map(|&x| Cell::from(x)).collect();
        let mut b = Bucket::default();
        for c in &cells {
            b.push(c, agg);
        }
        agg.apply(&b)
    }

    #[test]
    fn reductions() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(agg_of(&xs, AggFunc::Sum), 40.0);
        assert_eq!(agg_of(&xs, AggFunc::Mean), 5.0);
        assert_eq!(agg_of(&xs, AggFunc::Count), 8.0);
        assert_eq!(agg_of(&xs, AggFunc::Min), 2.0);
        assert_eq!(agg_of(&xs, AggFunc::Max), 9.0);
        assert_eq!(agg_of(&xs, AggFunc::Median), 4.5);
        assert_eq!(agg_of(&xs, AggFunc::NUnique), 5.0);
        assert!((agg_of(&xs, AggFunc::Std) - 2.138_089_935).abs() < 1e-6);
        assert_eq!(agg_of(&[3.0], AggFunc::Std), 0.0);
        assert_eq!(agg_of(&[], AggFunc::Mean), 0.0);
    }

    #[test]
    fn parse_names() {
        assert_eq!("MEAN".parse::<AggFunc>().unwrap(), AggFunc::Mean);
        assert!(matches!("avg".parse::<AggFunc>(), Err(Error::InvalidAggFunc(_))));
    }

    #[test]
    fn pivot_with_legend_fills_zero() {
        let p = pivot_table(&sales(), "region", "units", Some("product"), AggFunc::Sum).unwrap();
        assert_eq!(p.index, vec![Label::from("east"), "north".into(), "south".into()]);
        assert_eq!(p.columns, vec![Label::from("a"), "b".into()]);
        assert_eq!(p.column_values(0), vec![0.0, 4.0, 2.0]);
        assert_eq!(p.column_values(1), vec![0.0, 4.0, 0.0]);
    }

    #[test]
    fn pivot_without_legend_has_value_column() {
        let p = pivot_table(&sales(), "region", "units", None, AggFunc::Count).unwrap();
        assert_eq!(p.columns, vec![Label::from("units")]);
        assert_eq!(p.column_values(0), vec![0.0, 3.0, 1.0]);
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = pivot_table(&sales(), "zone", "units", Some("kind"), AggFunc::Sum).unwrap_err();
        match err {
            Error::MissingColumns(m) => assert_eq!(m, vec!["zone".to_string(), "kind".to_string()]),
            other => panic!("unexpected {other:?}"),
        }
    }
}
