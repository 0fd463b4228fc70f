// File: crates/pivotal-core/src/pivot.rs
// Summary: Pivoted summary table (rows = categories, columns = groups) and row/column reshaping.

use std::fmt;

use crate::label::Label;

/// Rows are categories, columns are groups, cells are aggregated scalars.
/// A cell is `None` only where a derived table has no value (e.g. a missing YoY pair);
/// aggregation always fills absent combinations with `0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Pivot {
    pub index: Vec<Label>,
    pub columns: Vec<Label>,
    cells: Vec<Vec<Option<f64>>>,
}

impl Pivot {
    /// Build from row-major cells. Panics if `cells` is not `index.len() x columns.len()`.
    pub fn new(index: Vec<Label>, columns: Vec<Label>, cells: Vec<Vec<Option<f64>>>) -> Self {
        assert_eq!(cells.len(), index.len(), "pivot row count mismatch");
        assert!(cells.iter().all(|r| r.len() == columns.len()), "pivot column count mismatch");
        Self { index, columns, cells }
    }

    /// Dense constructor used by aggregation.
    pub fn from_dense(index: Vec<Label>, columns: Vec<Label>, values: Vec<Vec<f64>>) -> Self {
        let cells = values.into_iter().map(|r| r.into_iter().map(Some).collect()).collect();
        Self::new(index, columns, cells)
    }

    pub fn num_rows(&self) -> usize { self.index.len() }

    pub fn num_columns(&self) -> usize { self.columns.len() }

    pub fn is_empty(&self) -> bool { self.index.is_empty() }

    pub fn row_position(&self, label: &Label) -> Option<usize> {
        self.index.iter().position(|l| l == label)
    }

    pub fn column_position(&self, label: &Label) -> Option<usize> {
        self.columns.iter().position(|l| l == label)
    }

    /// Cell by position.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Cell by labels.
    pub fn get(&self, row: &Label, col: &Label) -> Option<f64> {
        let r = self.row_position(row)?;
        let c = self.column_position(col)?;
        self.value(r, c)
    }

    pub fn row(&self, row: usize) -> &[Option<f64>] { &self.cells[row] }

    /// Values of one column, missing cells as 0.
    pub fn column_values(&self, col: usize) -> Vec<f64> {
        self.cells.iter().map(|r| r[col].unwrap_or(0.0)).collect()
    }

    pub fn row_total(&self, row: usize) -> f64 {
        self.cells[row].iter().flatten().sum()
    }

    pub fn column_total(&self, col: usize) -> f64 {
        self.cells.iter().filter_map(|r| r[col]).sum()
    }

    pub fn row_totals(&self) -> Vec<f64> {
        (0..self.num_rows()).map(|r| self.row_total(r)).collect()
    }

    pub fn column_totals(&self) -> Vec<f64> {
        (0..self.num_columns()).map(|c| self.column_total(c)).collect()
    }

    /// Largest absolute row sum; scales stacked-bar spacing.
    pub fn max_abs_row_total(&self) -> f64 {
        self.cells
            .iter()
            .map(|r| r.iter().flatten().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Keep rows at `positions`, in that order.
    pub fn select_rows(&self, positions: &[usize]) -> Pivot {
        Pivot {
            index: positions.iter().map(|&i| self.index[i].clone()).collect(),
            columns: self.columns.clone(),
            cells: positions.iter().map(|&i| self.cells[i].clone()).collect(),
        }
    }

    /// Keep columns at `positions`, in that order.
    pub fn select_columns(&self, positions: &[usize]) -> Pivot {
        Pivot {
            index: self.index.clone(),
            columns: positions.iter().map(|&i| self.columns[i].clone()).collect(),
            cells: self
                .cells
                .iter()
                .map(|r| positions.iter().map(|&i| r[i]).collect())
                .collect(),
        }
    }

    /// Cumulative sum down the rows, per column. Missing cells keep the running value.
    pub fn running_total(&self) -> Pivot {
        let mut acc = vec![0.0f64; self.num_columns()];
        let cells = self
            .cells
            .iter()
            .map(|r| {
                r.iter()
                    .enumerate()
                    .map(|(c, v)| {
                        acc[c] += v.unwrap_or(0.0);
                        Some(acc[c])
                    })
                    .collect()
            })
            .collect();
        Pivot { index: self.index.clone(), columns: self.columns.clone(), cells }
    }

    /// Ordered nested mapping: category → [(group, value)]. Missing cells are left out.
    pub fn to_nested(&self) -> Vec<(Label, Vec<(Label, f64)>)> {
        self.index
            .iter()
            .zip(&self.cells)
            .map(|(row, cells)| {
                let groups = self
                    .columns
                    .iter()
                    .zip(cells)
                    .filter_map(|(col, v)| v.map(|v| (col.clone(), v)))
                    .collect();
                (row.clone(), groups)
            })
            .collect()
    }
}

impl fmt::Display for Pivot {
    /// Plain aligned text table; blank cells are missing values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        let rows: Vec<(String, Vec<String>)> = self
            .index
            .iter()
            .zip(&self.cells)
            .map(|(l, r)| {
                let cells = r.iter().map(|v| v.map(format_number).unwrap_or_default()).collect();
                (l.to_string(), cells)
            })
            .collect();

        let first_w = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let widths: Vec<usize> = head
            .iter()
            .enumerate()
            .map(|(c, h)| rows.iter().map(|(_, r)| r[c].len()).chain([h.len()]).max().unwrap_or(0))
            .collect();

        write!(f, "{:first_w$}", "")?;
        for (h, w) in head.iter().zip(&widths) {
            write!(f, "  {h:>w$}")?;
        }
        writeln!(f)?;
        for (label, cells) in &rows {
            write!(f, "{label:first_w$}")?;
            for (c, w) in cells.iter().zip(&widths) {
                write!(f, "  {c:>w$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn format_number(v: f64) -> String {
    if v.is_infinite() {
        return if v > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
