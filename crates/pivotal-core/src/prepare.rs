// File: crates/pivotal-core/src/prepare.rs
// Summary: Chart data pipeline: pivot → limit → sort axis → sort legend, plus the aligned source rows.

use std::collections::BTreeSet;

use tracing::debug;

use crate::aggregate::{pivot_table, AggFunc};
use crate::error::Result;
use crate::label::Label;
use crate::limit::Limit;
use crate::pivot::Pivot;
use crate::sort::{SortOn, SortSpec};
use crate::table::Table;

/// Everything needed to turn a raw table into chart-ready pivot data.
#[derive(Clone, Debug, PartialEq)]
pub struct DataProperties {
    /// Categorical axis column.
    pub x_axis: String,
    /// Value axis column.
    pub y_axis: String,
    pub agg_func: AggFunc,
    /// Optional grouping column; its values become pivot columns.
    pub legend: Option<String>,
    pub limit: Option<Limit>,
    pub sort_axis: Option<SortSpec>,
    pub sort_legend: Option<SortSpec>,
}

impl DataProperties {
    pub fn new(x_axis: impl Into<String>, y_axis: impl Into<String>) -> Self {
        Self {
            x_axis: x_axis.into(),
            y_axis: y_axis.into(),
            agg_func: AggFunc::Sum,
            legend: None,
            limit: None,
            sort_axis: None,
            sort_legend: None,
        }
    }

    pub fn with_agg(mut self, agg: AggFunc) -> Self {
        self.agg_func = agg;
        self
    }

    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sort_axis(mut self, sort: SortSpec) -> Self {
        self.sort_axis = Some(sort);
        self
    }

    pub fn with_sort_legend(mut self, sort: SortSpec) -> Self {
        self.sort_legend = Some(sort);
        self
    }
}

/// Pivot plus the subset of source rows whose category survived limiting/sorting.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedData {
    pub pivot: Pivot,
    pub table: Table,
    pub properties: DataProperties,
}

impl PreparedData {
    /// Replace the pivot with its running total (cumulative line charts).
    pub fn into_running_total(mut self) -> Self {
        self.pivot = self.pivot.running_total();
        self
    }
}

pub struct DataFactory<'a> {
    table: &'a Table,
}

impl<'a> DataFactory<'a> {
    pub fn new(table: &'a Table) -> Self { Self { table } }

    pub fn build(&self, properties: &DataProperties) -> Result<PreparedData> {
        let mut pivot = pivot_table(
            self.table,
            &properties.x_axis,
            &properties.y_axis,
            properties.legend.as_deref(),
            properties.agg_func,
        )?;

        if let Some(limit) = &properties.limit {
            pivot = limit.apply(&pivot)?;
        }
        if let Some(sort) = &properties.sort_axis {
            pivot = sort.apply(&pivot, SortOn::Index)?;
        }
        if let Some(sort) = &properties.sort_legend {
            pivot = sort.apply(&pivot, SortOn::Columns)?;
        }

        let keep: BTreeSet<&Label> = pivot.index.iter().collect();
        let categories = self.table.column(&properties.x_axis)?;
        let table = self
            .table
            .filter_rows(|i| categories[i].to_label().is_some_and(|l| keep.contains(&l)));

        debug!(
            categories = pivot.num_rows(),
            groups = pivot.num_columns(),
            rows = table.num_rows(),
            "data prepared"
        );
        Ok(PreparedData { pivot, table, properties: properties.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortBy;
    use crate::table::Cell;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        let rows = [
            ("a", "x", 1.0),
            ("b", "x", 5.0),
            ("b", "y", 2.0),
            ("c", "y", 4.0),
            ("d", "x", 0.5),
        ];
        Table::from_rows(
            ["cat", "grp", "v"],
            rows.into_iter().map(|(c, g, v)| [Cell::from(c), Cell::from(g), Cell::from(v)]),
        )
        .unwrap()
    }

    #[test]
    fn limit_then_sort_and_filter_rows() {
        let props = DataProperties::new("cat", "v")
            .with_legend("grp")
            .with_limit(Limit::Top(2))
            .with_sort_axis(SortSpec::asc(SortBy::Label))
            .with_sort_legend(SortSpec::explicit(["y", "x"]));
        let data = DataFactory::new(&table()).build(&props).unwrap();

        assert_eq!(data.pivot.index, vec![Label::from("b"), Label::from("c")]);
        assert_eq!(data.pivot.columns, vec![Label::from("y"), Label::from("x")]);
        assert_eq!(data.pivot.row(0), &[Some(2.0), Some(5.0)]);
        assert_eq!(data.table.num_rows(), 3);
    }

    #[test]
    fn running_total_replaces_pivot() {
        let data = DataFactory::new(&table()).build(&DataProperties::new("cat", "v")).unwrap();
        let cum = data.into_running_total();
        assert_eq!(cum.pivot.column_values(0), vec![1.0, 8.0, 12.0, 12.5]);
    }
}
