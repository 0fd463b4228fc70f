// File: crates/pivotal-core/src/measures.rs
// Summary: Derived measures over prepared chart data; year-over-year deltas per category.
//
// Values per (category, year) are reduced with the chart's aggregation function.
// The delta at year Y is value(Y) - value(previous requested year); a category
// missing either year simply has no entry for that pair.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{group_aggregate, AggFunc};
use crate::error::{Error, Result};
use crate::label::Label;
use crate::pivot::Pivot;
use crate::prepare::PreparedData;
use crate::table::Table;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct YoyOptions {
    /// Date column used to assign rows to years.
    pub date_field: String,
    /// Years to compare. Empty selects the two most recent years in the data.
    #[serde(default)]
    pub years: Vec<i32>,
    /// Cut earlier years off at the latest day-of-year reached in the last year.
    #[serde(default)]
    pub match_periods: bool,
}

impl YoyOptions {
    pub fn new(date_field: impl Into<String>) -> Self {
        Self { date_field: date_field.into(), years: Vec::new(), match_periods: false }
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn with_matched_periods(mut self, on: bool) -> Self {
        self.match_periods = on;
        self
    }
}

/// Year-over-year result: category → year → delta, plus the per-year values it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct YoyTable {
    years: Vec<i32>,
    values: Pivot,
    deltas: Vec<(Label, BTreeMap<i32, f64>)>,
}

impl YoyTable {
    /// Selected years, ascending.
    pub fn years(&self) -> &[i32] { &self.years }

    /// Aggregated value per (category, year); `None` where the category has no rows that year.
    pub fn values(&self) -> &Pivot { &self.values }

    pub fn len(&self) -> usize { self.deltas.len() }

    pub fn is_empty(&self) -> bool { self.deltas.is_empty() }

    /// Delta for `category` at `year` (against the previous selected year).
    pub fn get(&self, category: &Label, year: i32) -> Option<f64> {
        self.deltas
            .iter()
            .find(|(c, _)| c == category)
            .and_then(|(_, m)| m.get(&year).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &BTreeMap<i32, f64>)> {
        self.deltas.iter().map(|(c, m)| (c, m))
    }

    /// Ordered nested mapping: category → year → delta.
    pub fn to_nested(&self) -> Vec<(Label, BTreeMap<i32, f64>)> { self.deltas.clone() }

    /// Deltas as a pivot: rows = categories, columns = years that have a predecessor.
    pub fn to_pivot(&self) -> Pivot {
        let columns: Vec<i32> = self.years.iter().skip(1).copied().collect();
        let cells = self
            .deltas
            .iter()
            .map(|(_, m)| columns.iter().map(|y| m.get(y).copied()).collect())
            .collect();
        Pivot::new(
            self.deltas.iter().map(|(c, _)| c.clone()).collect(),
            columns.into_iter().map(Label::from).collect(),
            cells,
        )
    }

    /// Growth rate (cur - prev) / prev, rounded to 4 decimals.
    /// prev = 0 gives +inf / -inf by the sign of cur, or 0 when both are 0.
    pub fn rate(&self, category: &Label, year: i32) -> Option<f64> {
        let pos = self.years.iter().position(|&y| y == year)?;
        let prev_year = *self.years.get(pos.checked_sub(1)?)?;
        let cur = self.values.get(category, &Label::from(year))?;
        let prev = self.values.get(category, &Label::from(prev_year))?;
        if prev == 0.0 {
            return Some(if cur > 0.0 {
                f64::INFINITY
            } else if cur < 0.0 {
                f64::NEG_INFINITY
            } else {
                0.0
            });
        }
        Some(((cur - prev) / prev * 10_000.0).round() / 10_000.0)
    }
}

/// Compute year-over-year deltas of `values` per `category`, categories in natural order.
pub fn year_over_year(
    table: &Table,
    category: &str,
    values: &str,
    agg: AggFunc,
    options: &YoyOptions,
) -> Result<YoyTable> {
    yoy_in_order(table, category, values, agg, options, None)
}

/// `order` fixes the category order of the result; unlisted categories follow in natural order.
fn yoy_in_order(
    table: &Table,
    category: &str,
    values: &str,
    agg: AggFunc,
    options: &YoyOptions,
    order: Option<&[Label]>,
) -> Result<YoyTable> {
    table.require(&[category, values, options.date_field.as_str()])?;
    let dates = table.date_column(&options.date_field)?;
    let cats = table.column(category)?;
    let vals = table.column(values)?;

    let available: BTreeSet<i32> = dates.iter().flatten().map(|d| d.year()).collect();
    let years = select_years(&available, &options.years)?;
    let latest = years[years.len() - 1];

    let cutoff = if options.match_periods {
        dates.iter().flatten().filter(|d| d.year() == latest).map(|d| d.ordinal()).max()
    } else {
        None
    };

    let triples = (0..table.num_rows()).filter_map(|i| {
        let date = dates[i]?;
        let year = date.year();
        if !years.contains(&year) {
            return None;
        }
        if let Some(cut) = cutoff {
            if year != latest && date.ordinal() > cut {
                return None;
            }
        }
        Some((cats[i].to_label()?, Label::from(year), &vals[i]))
    });
    let grouped = group_aggregate(triples, agg);

    let categories = ordered_categories(grouped.rows, order);
    let year_labels: Vec<Label> = years.iter().copied().map(Label::from).collect();
    let cells = categories
        .iter()
        .map(|c| {
            year_labels
                .iter()
                .map(|y| grouped.values.get(&(c.clone(), y.clone())).copied())
                .collect()
        })
        .collect();
    let value_pivot = Pivot::new(categories, year_labels, cells);

    let deltas: Vec<(Label, BTreeMap<i32, f64>)> = value_pivot
        .index
        .iter()
        .enumerate()
        .filter_map(|(r, c)| {
            let per_year: BTreeMap<i32, f64> = years
                .windows(2)
                .enumerate()
                .filter_map(|(k, pair)| {
                    let prev = value_pivot.value(r, k)?;
                    let cur = value_pivot.value(r, k + 1)?;
                    Some((pair[1], cur - prev))
                })
                .collect();
            (!per_year.is_empty()).then(|| (c.clone(), per_year))
        })
        .collect();

    debug!(?years, ?cutoff, categories = deltas.len(), "yoy computed");
    Ok(YoyTable { years, values: value_pivot, deltas })
}

fn select_years(available: &BTreeSet<i32>, requested: &[i32]) -> Result<Vec<i32>> {
    let all: Vec<i32> = available.iter().copied().collect();
    if requested.is_empty() {
        if all.len() < 2 {
            return Err(Error::NotEnoughYears(all));
        }
        return Ok(all[all.len() - 2..].to_vec());
    }
    let wanted: Vec<i32> = requested.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if wanted.len() < 2 {
        return Err(Error::NotEnoughYears(wanted));
    }
    if let Some(&year) = wanted.iter().find(|y| !available.contains(y)) {
        return Err(Error::YearNotFound { year, available: all });
    }
    Ok(wanted)
}

fn ordered_categories(natural: Vec<Label>, order: Option<&[Label]>) -> Vec<Label> {
    let Some(order) = order else { return natural };
    let mut out: Vec<Label> = order.iter().filter(|l| natural.contains(l)).cloned().collect();
    out.extend(natural.into_iter().filter(|l| !order.contains(l)));
    out
}

/// Measures computed from a chart's prepared data (category, value and aggregation
/// are taken from the chart; the legend dimension is replaced by the year).
pub struct Measures<'a> {
    data: &'a PreparedData,
}

impl<'a> Measures<'a> {
    pub fn new(data: &'a PreparedData) -> Self { Self { data } }

    pub fn yoy(&self, options: &YoyOptions) -> Result<YoyTable> {
        let props = &self.data.properties;
        yoy_in_order(
            &self.data.table,
            &props.x_axis,
            &props.y_axis,
            props.agg_func,
            options,
            Some(&self.data.pivot.index),
        )
    }
}
