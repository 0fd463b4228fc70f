// File: crates/pivotal-core/src/table.rs
// Summary: Column-oriented input table with typed cells and CSV loading.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{Error, Result};
use crate::label::Label;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A single table value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Infer a cell from raw text: empty → Null, number, date/datetime, else text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Cell::Null;
        }
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return Cell::Number(n);
            }
        }
        if let Some(d) = parse_date(s) {
            return Cell::Date(d);
        }
        if let Some(dt) = parse_datetime(s) {
            return Cell::DateTime(dt);
        }
        Cell::Text(s.to_string())
    }

    pub fn is_null(&self) -> bool { matches!(self, Cell::Null) }

    /// Numeric value; text is not coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Calendar day of a date or timestamp cell.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::DateTime(dt) => Some(dt.date()),
            Cell::Text(s) => parse_date(s).or_else(|| parse_datetime(s).map(|dt| dt.date())),
            _ => None,
        }
    }

    /// Key used when this cell is a category or group value. Null has no key.
    pub fn to_label(&self) -> Option<Label> {
        match self {
            Cell::Null => None,
            Cell::Number(n) => Some(Label::from_number(*n)),
            Cell::Text(s) => Some(Label::Text(s.clone())),
            Cell::Date(d) => Some(Label::Date(*d)),
            Cell::DateTime(dt) => Some(Label::DateTime(*dt)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Null => "null".to_string(),
            Cell::Number(n) => format!("number {n}"),
            Cell::Text(s) => format!("text '{s}'"),
            Cell::Date(d) => format!("date {d}"),
            Cell::DateTime(dt) => format!("timestamp {dt}"),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Number(v) }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self { Cell::Number(v as f64) }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self { Cell::Number(v as f64) }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self { Cell::Text(v.to_string()) }
}

impl From<String> for Cell {
    fn from(v: String) -> Self { Cell::Text(v) }
}

impl From<NaiveDate> for Cell {
    fn from(v: NaiveDate) -> Self { Cell::Date(v) }
}

impl From<NaiveDateTime> for Cell {
    fn from(v: NaiveDateTime) -> Self { Cell::DateTime(v) }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Cell::Null) }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
}

/// Named columns of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
    rows: usize,
}

impl Table {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let columns = names.iter().map(|_| Vec::new()).collect();
        Self { names, columns, rows: 0 }
    }

    /// Build a table from literal rows; every row must match the header width.
    pub fn from_rows<S, R>(names: impl IntoIterator<Item = S>, rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        S: Into<String>,
        R: IntoIterator<Item = Cell>,
    {
        let mut table = Self::new(names);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: impl IntoIterator<Item = Cell>) -> Result<()> {
        let row: Vec<Cell> = row.into_iter().collect();
        if row.len() != self.names.len() {
            return Err(Error::RowWidth { want: self.names.len(), got: row.len() });
        }
        for (col, cell) in self.columns.iter_mut().zip(row) {
            col.push(cell);
        }
        self.rows += 1;
        Ok(())
    }

    pub fn num_rows(&self) -> usize { self.rows }

    pub fn is_empty(&self) -> bool { self.rows == 0 }

    pub fn column_names(&self) -> &[String] { &self.names }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Result<&[Cell]> {
        self.column_index(name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| Error::MissingColumns(vec![name.to_string()]))
    }

    /// Check that every name exists, reporting all missing ones together.
    pub fn require(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.column_index(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if missing.is_empty() { Ok(()) } else { Err(Error::MissingColumns(missing)) }
    }

    /// Dates of `name`, with an error naming the first non-date, non-null cell.
    pub fn date_column(&self, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let cells = self.column(name)?;
        cells
            .iter()
            .enumerate()
            .map(|(row, c)| match c {
                Cell::Null => Ok(None),
                other => other.as_date().map(Some).ok_or_else(|| Error::NotADate {
                    column: name.to_string(),
                    row,
                    found: other.describe(),
                }),
            })
            .collect()
    }

    /// New table holding only the rows for which `keep(row_index)` is true.
    pub fn filter_rows(&self, mut keep: impl FnMut(usize) -> bool) -> Table {
        let selected: Vec<usize> = (0..self.rows).filter(|&i| keep(i)).collect();
        let columns = self
            .columns
            .iter()
            .map(|col| selected.iter().map(|&i| col[i].clone()).collect())
            .collect();
        Table { names: self.names.clone(), columns, rows: selected.len() }
    }

    /// Load a headered CSV; cells are typed with [`Cell::parse`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(|h| h.to_string()).collect::<Vec<_>>();
        debug!(?headers, "csv headers");
        let width = headers.len();
        let mut table = Table::new(headers);

        for rec in rdr.records() {
            let rec = rec?;
            // Short rows are padded with nulls, long rows truncated.
            let row = (0..width).map(|i| rec.get(i).map(Cell::parse).unwrap_or(Cell::Null));
            table.push_row(row)?;
        }
        debug!(rows = table.num_rows(), "csv loaded");
        Ok(table)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn csv_cells_are_typed() {
        let csv = "region,sales,date\nNorth,10.5,2023-02-01\nSouth,,2023-02-03 10:00:00\n";
        let t = Table::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(t.num_rows(), 2);
        assert_eq!(t.column("sales").unwrap(), &[Cell::Number(10.5), Cell::Null]);
        let d = t.date_column("date").unwrap();
        assert_eq!(d[1], NaiveDate::from_ymd_opt(2023, 2, 3));
        let ts = NaiveDate::from_ymd_opt(2023, 2, 3).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(t.column("date").unwrap()[1], Cell::DateTime(ts));
        assert_eq!(t.column("region").unwrap()[0], Cell::from("North"));
    }

    #[test]
    fn require_reports_all_missing() {
        let t = Table::new(["a", "b"]);
        match t.require(&["a", "x", "y"]) {
            Err(Error::MissingColumns(m)) => assert_eq!(m, vec!["x".to_string(), "y".to_string()]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn push_row_checks_width() {
        let mut t = Table::new(["a", "b"]);
        assert!(matches!(t.push_row([Cell::from(1)]), Err(Error::RowWidth { want: 2, got: 1 })));
    }

    #[test]
    fn filter_keeps_selected_rows() {
        let t = Table::from_rows(["k"], (0..5).map(|i| [Cell::from(i)])).unwrap();
        let odd = t.filter_rows(|i| i % 2 == 1);
        assert_eq!(odd.column("k").unwrap(), &[Cell::from(1), Cell::from(3)]);
    }

    #[test]
    fn date_column_rejects_numbers() {
        let t = Table::from_rows(["d"], [[Cell::from(5)]]).unwrap();
        assert!(matches!(t.date_column("d"), Err(Error::NotADate { row: 0, .. })));
    }
}
